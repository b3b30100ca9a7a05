use super::answers::{parse_number, RawAnswers};
use super::question::{QuestionId, QuestionKind, QuestionSpec, QUESTIONS};

/// Check a submission before it is scored.
/// Returns all problems at once (not just the first), in question order.
pub fn validate_answers(answers: &RawAnswers) -> Result<(), Vec<String>> {
    let errors: Vec<String> = answer_problems(answers)
        .into_iter()
        .map(|(_, error)| error)
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every problem paired with the question it belongs to.
pub fn answer_problems(answers: &RawAnswers) -> Vec<(QuestionId, String)> {
    QUESTIONS
        .iter()
        .filter_map(|q| check_question(q, answers).map(|error| (q.id, error)))
        .collect()
}

/// Questions that still need an answer, in display order.
pub fn missing_questions(answers: &RawAnswers) -> Vec<&'static QuestionSpec> {
    QUESTIONS
        .iter()
        .filter(|q| !answers.is_answered(q.id))
        .collect()
}

fn check_question(question: &QuestionSpec, answers: &RawAnswers) -> Option<String> {
    let key = question.id.key();
    let value = match answers.get(question.id) {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Some(format!("{}: answer required", key)),
    };

    match question.kind {
        QuestionKind::Number => match parse_number(value) {
            Some(n) if n.is_finite() => None,
            _ => Some(format!("{}: '{}' is not a number", key, value.trim())),
        },
        QuestionKind::Select(options) => {
            if question.canonical_option(value).is_some() {
                None
            } else {
                Some(format!(
                    "{}: '{}' is not one of {}",
                    key,
                    value.trim(),
                    options.join(", ")
                ))
            }
        }
    }
}
