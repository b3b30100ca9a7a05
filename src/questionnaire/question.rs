use anyhow::{bail, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Identifies one of the ten questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuestionId {
    Age,
    Gender,
    Smoker,
    Exercise,
    Diet,
    Sleep,
    Stress,
    Alcohol,
    Bmi,
    FamilyHistory,
}

impl QuestionId {
    /// Canonical identifier as shown to users and accepted in answer files.
    pub fn key(self) -> &'static str {
        match self {
            QuestionId::Age => "age",
            QuestionId::Gender => "gender",
            QuestionId::Smoker => "smoker",
            QuestionId::Exercise => "exercise",
            QuestionId::Diet => "diet",
            QuestionId::Sleep => "sleep",
            QuestionId::Stress => "stress",
            QuestionId::Alcohol => "alcohol",
            QuestionId::Bmi => "bmi",
            QuestionId::FamilyHistory => "familyHistory",
        }
    }

    /// Short label for status messages and breakdowns.
    pub fn label(self) -> &'static str {
        match self {
            QuestionId::Age => "Age",
            QuestionId::Gender => "Gender",
            QuestionId::Smoker => "Smoker",
            QuestionId::Exercise => "Exercise",
            QuestionId::Diet => "Diet",
            QuestionId::Sleep => "Sleep",
            QuestionId::Stress => "Stress",
            QuestionId::Alcohol => "Alcohol",
            QuestionId::Bmi => "BMI",
            QuestionId::FamilyHistory => "Family history",
        }
    }

    pub fn spec(self) -> &'static QuestionSpec {
        // QUESTIONS is declared in enum order
        &QUESTIONS[self as usize]
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Lookup ignores case, `_` and `-`: "familyHistory", "family_history" and
/// "FAMILY-HISTORY" all resolve to the same question.
impl FromStr for QuestionId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = normalize_key(s);
        for question in QUESTIONS.iter() {
            if normalize_key(question.id.key()) == wanted {
                return Ok(question.id);
            }
        }
        bail!("Unknown question id: '{}'", s.trim())
    }
}

fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Number,
    Select(&'static [&'static str]),
}

impl QuestionKind {
    pub fn name(&self) -> &'static str {
        match self {
            QuestionKind::Number => "number",
            QuestionKind::Select(_) => "select",
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            QuestionKind::Number => &[],
            QuestionKind::Select(options) => options,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionSpec {
    pub id: QuestionId,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

const YES_NO: &[&str] = &["Yes", "No"];

/// The questionnaire, in display order.
pub static QUESTIONS: [QuestionSpec; 10] = [
    QuestionSpec {
        id: QuestionId::Age,
        prompt: "What is your age?",
        kind: QuestionKind::Number,
    },
    QuestionSpec {
        id: QuestionId::Gender,
        prompt: "What is your gender?",
        kind: QuestionKind::Select(&["Male", "Female", "Other"]),
    },
    QuestionSpec {
        id: QuestionId::Smoker,
        prompt: "Do you smoke?",
        kind: QuestionKind::Select(YES_NO),
    },
    QuestionSpec {
        id: QuestionId::Exercise,
        prompt: "How many days a week do you exercise?",
        kind: QuestionKind::Number,
    },
    QuestionSpec {
        id: QuestionId::Diet,
        prompt: "How healthy is your diet?",
        kind: QuestionKind::Select(&["Poor", "Fair", "Good", "Excellent"]),
    },
    QuestionSpec {
        id: QuestionId::Sleep,
        prompt: "How many hours of sleep do you get per night?",
        kind: QuestionKind::Number,
    },
    QuestionSpec {
        id: QuestionId::Stress,
        prompt: "How would you rate your stress level?",
        kind: QuestionKind::Select(&["Low", "Moderate", "High"]),
    },
    QuestionSpec {
        id: QuestionId::Alcohol,
        prompt: "Do you consume alcohol?",
        kind: QuestionKind::Select(YES_NO),
    },
    QuestionSpec {
        id: QuestionId::Bmi,
        prompt: "What is your BMI?",
        kind: QuestionKind::Number,
    },
    QuestionSpec {
        id: QuestionId::FamilyHistory,
        prompt: "Do you have a family history of chronic disease?",
        kind: QuestionKind::Select(YES_NO),
    },
];

impl QuestionSpec {
    /// Match `value` against this question's options, ignoring ASCII case.
    /// Returns the canonical spelling.
    pub fn canonical_option(&self, value: &str) -> Option<&'static str> {
        let value = value.trim();
        self.kind
            .options()
            .iter()
            .copied()
            .find(|opt| opt.eq_ignore_ascii_case(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_questions_in_enum_order() {
        for (i, q) in QUESTIONS.iter().enumerate() {
            assert_eq!(q.id as usize, i, "{} out of order", q.id);
            assert_eq!(q.id.spec().prompt, q.prompt);
        }
    }

    #[test]
    fn test_parse_canonical_keys() {
        for q in QUESTIONS.iter() {
            assert_eq!(q.id.key().parse::<QuestionId>().unwrap(), q.id);
        }
    }

    #[test]
    fn test_parse_family_history_spellings() {
        for s in ["familyHistory", "family_history", "family-history", " FAMILYHISTORY "] {
            assert_eq!(s.parse::<QuestionId>().unwrap(), QuestionId::FamilyHistory);
        }
    }

    #[test]
    fn test_parse_unknown_id() {
        let err = "weight".parse::<QuestionId>().unwrap_err();
        assert!(err.to_string().contains("weight"));
    }

    #[test]
    fn test_canonical_option_ignores_case() {
        let diet = QuestionId::Diet.spec();
        assert_eq!(diet.canonical_option("excellent"), Some("Excellent"));
        assert_eq!(diet.canonical_option(" Poor "), Some("Poor"));
        assert_eq!(diet.canonical_option("Great"), None);
    }

    #[test]
    fn test_number_question_has_no_options() {
        let bmi = QuestionId::Bmi.spec();
        assert_eq!(bmi.kind.name(), "number");
        assert!(bmi.kind.options().is_empty());
        assert_eq!(bmi.canonical_option("30"), None);
    }
}
