use crate::questionnaire::{
    answer_problems, missing_questions, AnswerSet, QuestionKind, QuestionSpec, RawAnswers,
    QUESTIONS,
};
use crate::scoring::{compute_scores, ScoreResult};
use crate::tui::theme::ThemeColors;
use std::time::Instant;

/// Row index of the "Calculate" button, one past the last question.
pub const SUBMIT_ROW: usize = QUESTIONS.len();

const FLASH_SECS: u64 = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View {
    Form,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlashKind {
    Success,
    Error,
    Info,
}

/// Session state for one run of the questionnaire.
pub struct App {
    pub answers: RawAnswers,
    pub result: Option<ScoreResult>,
    pub table_state: ratatui::widgets::TableState,
    pub view: View,
    pub input_mode: InputMode,
    pub show_breakdown: bool,
    pub flash_message: Option<(String, FlashKind, Instant)>,
    pub should_quit: bool,
    pub theme: ThemeColors,
}

impl App {
    pub fn new(theme: ThemeColors, show_breakdown: bool) -> Self {
        let mut table_state = ratatui::widgets::TableState::default();
        table_state.select(Some(0));

        Self {
            answers: RawAnswers::new(),
            result: None,
            table_state,
            view: View::Form,
            input_mode: InputMode::Normal,
            show_breakdown,
            flash_message: None,
            should_quit: false,
            theme,
        }
    }

    pub fn selected_row(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    /// The question under the cursor; None on the submit row.
    pub fn selected_question(&self) -> Option<&'static QuestionSpec> {
        QUESTIONS.get(self.selected_row())
    }

    fn select_row(&mut self, row: usize) {
        self.table_state.select(Some(row.min(SUBMIT_ROW)));
    }

    pub fn next_row(&mut self) {
        let i = self.selected_row();
        self.select_row(if i >= SUBMIT_ROW { 0 } else { i + 1 });
    }

    pub fn previous_row(&mut self) {
        let i = self.selected_row();
        self.select_row(if i == 0 { SUBMIT_ROW } else { i - 1 });
    }

    pub fn answered_count(&self) -> usize {
        QUESTIONS
            .iter()
            .filter(|q| self.answers.is_answered(q.id))
            .count()
    }

    /// Type into a numeric answer. Only digits, `.` and `-` are accepted.
    /// Returns whether the character was taken.
    pub fn input_char(&mut self, c: char) -> bool {
        let question = match self.selected_question() {
            Some(q) if q.kind == QuestionKind::Number => q,
            _ => return false,
        };
        if !(c.is_ascii_digit() || c == '.' || c == '-') {
            return false;
        }

        let mut value = self.answers.get(question.id).unwrap_or("").to_string();
        value.push(c);
        self.answers.set(question.id, value);
        true
    }

    pub fn backspace(&mut self) {
        let Some(question) = self.selected_question() else {
            return;
        };
        if question.kind != QuestionKind::Number {
            self.answers.clear(question.id);
            return;
        }

        let mut value = self.answers.get(question.id).unwrap_or("").to_string();
        value.pop();
        if value.is_empty() {
            self.answers.clear(question.id);
        } else {
            self.answers.set(question.id, value);
        }
    }

    /// Step through a select question's options. From unanswered, forward
    /// lands on the first option and backward on the last.
    pub fn cycle_option(&mut self, forward: bool) {
        let Some(question) = self.selected_question() else {
            return;
        };
        let QuestionKind::Select(options) = question.kind else {
            return;
        };

        let current = self
            .answers
            .get(question.id)
            .and_then(|v| question.canonical_option(v))
            .and_then(|v| options.iter().position(|opt| *opt == v));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => options.len() - 1,
            (Some(i), true) => (i + 1) % options.len(),
            (Some(i), false) => (i + options.len() - 1) % options.len(),
        };
        self.answers.set(question.id, options[next]);
    }

    pub fn clear_selected(&mut self) {
        if let Some(question) = self.selected_question() {
            self.answers.clear(question.id);
        }
    }

    /// Validate and score. On failure the cursor moves to the first
    /// problem and a flash explains it; on success the results view opens.
    pub fn submit(&mut self) {
        let missing = missing_questions(&self.answers);
        if let Some(first) = missing.first() {
            let labels: Vec<&str> = missing.iter().map(|q| q.id.label()).collect();
            tracing::debug!(missing = labels.len(), "submission blocked");
            self.select_row(first.id as usize);
            self.show_flash(
                format!("Please answer: {}", labels.join(", ")),
                FlashKind::Error,
            );
            return;
        }

        if let Some((id, error)) = answer_problems(&self.answers).into_iter().next() {
            tracing::debug!(question = %id, "submission blocked: {}", error);
            self.select_row(id as usize);
            self.show_flash(format!("Invalid answer - {}", error), FlashKind::Error);
            return;
        }

        let answers = AnswerSet::from_raw(&self.answers);
        let result = compute_scores(&answers);
        tracing::info!(
            risk = result.risk_score,
            wellness = result.wellness_score,
            "assessment submitted"
        );

        self.result = Some(result);
        self.view = View::Results;
        self.show_flash("Scores calculated".to_string(), FlashKind::Success);
    }

    /// "Retake Assessment": drop answers and result, back to the first question.
    pub fn retake(&mut self) {
        self.answers.reset();
        self.result = None;
        self.view = View::Form;
        self.select_row(0);
        tracing::debug!("answers reset");
        self.show_flash("Answers cleared".to_string(), FlashKind::Info);
    }

    pub fn toggle_breakdown(&mut self) {
        self.show_breakdown = !self.show_breakdown;
    }

    pub fn show_help(&mut self) {
        self.input_mode = InputMode::Help;
    }

    pub fn dismiss_help(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn show_flash(&mut self, msg: String, kind: FlashKind) {
        self.flash_message = Some((msg, kind, Instant::now()));
    }

    pub fn update_flash(&mut self) {
        if let Some((_, _, timestamp)) = self.flash_message {
            if timestamp.elapsed().as_secs() >= FLASH_SECS {
                self.flash_message = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::QuestionId;

    fn app() -> App {
        App::new(ThemeColors::dark(), false)
    }

    fn goto(app: &mut App, id: QuestionId) {
        app.table_state.select(Some(id as usize));
    }

    fn type_str(app: &mut App, id: QuestionId, s: &str) {
        goto(app, id);
        for c in s.chars() {
            app.input_char(c);
        }
    }

    fn pick(app: &mut App, id: QuestionId, option: &str) {
        goto(app, id);
        for _ in 0..5 {
            app.cycle_option(true);
            if app.answers.get(id) == Some(option) {
                return;
            }
        }
        panic!("option {} not reachable for {}", option, id);
    }

    /// Scenario B from the results page examples
    fn fill_scenario_b(app: &mut App) {
        type_str(app, QuestionId::Age, "30");
        pick(app, QuestionId::Gender, "Female");
        pick(app, QuestionId::Smoker, "No");
        type_str(app, QuestionId::Exercise, "4");
        pick(app, QuestionId::Diet, "Excellent");
        type_str(app, QuestionId::Sleep, "8");
        pick(app, QuestionId::Stress, "Low");
        pick(app, QuestionId::Alcohol, "No");
        type_str(app, QuestionId::Bmi, "22");
        pick(app, QuestionId::FamilyHistory, "No");
    }

    #[test]
    fn test_navigation_wraps_through_submit_row() {
        let mut app = app();
        assert_eq!(app.selected_row(), 0);
        app.previous_row();
        assert_eq!(app.selected_row(), SUBMIT_ROW);
        assert!(app.selected_question().is_none());
        app.next_row();
        assert_eq!(app.selected_row(), 0);
        app.next_row();
        assert_eq!(app.selected_question().unwrap().id, QuestionId::Gender);
    }

    #[test]
    fn test_numeric_input_filters_characters() {
        let mut app = app();
        goto(&mut app, QuestionId::Bmi);
        assert!(app.input_char('2'));
        assert!(app.input_char('9'));
        assert!(app.input_char('.'));
        assert!(!app.input_char('x'));
        assert!(app.input_char('5'));
        assert_eq!(app.answers.get(QuestionId::Bmi), Some("29.5"));
    }

    #[test]
    fn test_typing_ignored_on_select_question() {
        let mut app = app();
        goto(&mut app, QuestionId::Smoker);
        assert!(!app.input_char('1'));
        assert_eq!(app.answers.get(QuestionId::Smoker), None);
    }

    #[test]
    fn test_backspace_clears_when_empty() {
        let mut app = app();
        type_str(&mut app, QuestionId::Age, "4");
        app.backspace();
        assert_eq!(app.answers.get(QuestionId::Age), None);
        assert_eq!(app.answered_count(), 0);
    }

    #[test]
    fn test_cycle_option_wraps_both_ways() {
        let mut app = app();
        goto(&mut app, QuestionId::Stress);
        app.cycle_option(false);
        assert_eq!(app.answers.get(QuestionId::Stress), Some("High"));
        app.cycle_option(true);
        assert_eq!(app.answers.get(QuestionId::Stress), Some("Low"));
        app.cycle_option(false);
        assert_eq!(app.answers.get(QuestionId::Stress), Some("High"));
    }

    #[test]
    fn test_submit_blocked_until_complete() {
        let mut app = app();
        type_str(&mut app, QuestionId::Age, "30");
        goto(&mut app, QuestionId::Bmi);
        app.submit();

        assert_eq!(app.view, View::Form);
        assert!(app.result.is_none());
        // cursor jumps to the first missing question
        assert_eq!(app.selected_question().unwrap().id, QuestionId::Gender);
        let (msg, kind, _) = app.flash_message.clone().unwrap();
        assert_eq!(kind, FlashKind::Error);
        assert!(msg.starts_with("Please answer: Gender"));
        assert!(!msg.contains("Age"));
    }

    #[test]
    fn test_submit_blocked_on_malformed_number() {
        let mut app = app();
        fill_scenario_b(&mut app);
        goto(&mut app, QuestionId::Sleep);
        app.clear_selected();
        type_str(&mut app, QuestionId::Sleep, "7-");

        app.submit();
        assert_eq!(app.view, View::Form);
        assert_eq!(app.selected_question().unwrap().id, QuestionId::Sleep);
        let (msg, _, _) = app.flash_message.clone().unwrap();
        assert!(msg.contains("sleep"));
    }

    #[test]
    fn test_submit_scores_and_shows_results() {
        let mut app = app();
        fill_scenario_b(&mut app);
        assert_eq!(app.answered_count(), 10);

        app.submit();
        assert_eq!(app.view, View::Results);
        let result = app.result.as_ref().unwrap();
        assert_eq!(result.risk_score, 0);
        assert_eq!(result.wellness_score, 60);
        assert!(result.wellness_comparison.contains("53%"));
    }

    #[test]
    fn test_resubmission_replaces_result() {
        let mut app = app();
        fill_scenario_b(&mut app);
        app.submit();
        assert_eq!(app.result.as_ref().unwrap().risk_score, 0);

        app.view = View::Form;
        pick(&mut app, QuestionId::Smoker, "Yes");
        app.submit();
        assert_eq!(app.result.as_ref().unwrap().risk_score, 25);
    }

    #[test]
    fn test_retake_clears_session() {
        let mut app = app();
        fill_scenario_b(&mut app);
        app.submit();

        app.retake();
        assert_eq!(app.view, View::Form);
        assert!(app.result.is_none());
        assert!(app.answers.is_empty());
        assert_eq!(app.selected_row(), 0);
    }

    #[test]
    fn test_toggle_breakdown_and_help() {
        let mut app = app();
        app.toggle_breakdown();
        assert!(app.show_breakdown);
        app.show_help();
        assert_eq!(app.input_mode, InputMode::Help);
        app.dismiss_help();
        assert_eq!(app.input_mode, InputMode::Normal);
    }
}
