use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::question::{QuestionId, QuestionKind};

/// Answers exactly as the user entered them, keyed by question.
///
/// This is what a collector holds while the form is being filled in. Nothing
/// here is validated; see [`crate::questionnaire::validate_answers`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAnswers {
    values: BTreeMap<QuestionId, String>,
}

impl RawAnswers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: QuestionId, value: impl Into<String>) {
        self.values.insert(id, value.into());
    }

    pub fn clear(&mut self, id: QuestionId) {
        self.values.remove(&id);
    }

    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    /// True when the answer is present and not just whitespace.
    pub fn is_answered(&self, id: QuestionId) -> bool {
        self.get(id).is_some_and(|v| !v.trim().is_empty())
    }

    /// Forget every answer (the "Retake" action).
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy every answer from `other` over this one.
    pub fn merge(&mut self, other: RawAnswers) {
        self.values.extend(other.values);
    }

    /// Parse a single `id=value` assignment as given on the command line.
    pub fn parse_assignment(s: &str) -> Result<(QuestionId, String)> {
        let (key, value) = s
            .split_once('=')
            .with_context(|| format!("Expected ID=VALUE, got '{}'", s))?;
        let id: QuestionId = key.parse()?;
        Ok((id, value.trim().to_string()))
    }
}

/// Scalar in an answers file. YAML lets people write `age: 45` or
/// `smoker: yes`, so numbers and booleans are accepted alongside strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl FileValue {
    fn into_text(self) -> String {
        match self {
            FileValue::Bool(true) => "Yes".to_string(),
            FileValue::Bool(false) => "No".to_string(),
            FileValue::Number(n) => n.to_string(),
            FileValue::Text(s) => s,
        }
    }
}

/// Load answers from a YAML mapping of question id to value.
///
/// Unknown question ids are an error, and so are two spellings of the same
/// id (`familyHistory` and `family_history`).
pub fn load_answers_file(path: &Path) -> Result<RawAnswers> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read answers file at {}", path.display()))?;
    parse_answers_yaml(&content)
        .with_context(|| format!("Failed to parse answers in {}", path.display()))
}

pub fn parse_answers_yaml(content: &str) -> Result<RawAnswers> {
    let entries: BTreeMap<String, FileValue> =
        serde_saphyr::from_str(content).context("Invalid YAML: expected a mapping of id: value")?;

    let mut answers = RawAnswers::new();
    let mut seen: BTreeMap<QuestionId, String> = BTreeMap::new();
    for (key, value) in entries {
        let id: QuestionId = key.parse()?;
        if let Some(previous) = seen.insert(id, key.clone()) {
            bail!("'{}' and '{}' both answer '{}'", previous, key, id);
        }
        answers.set(id, value.into_text());
    }
    Ok(answers)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YesNo {
    Yes,
    No,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Poor,
    Fair,
    Good,
    Excellent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

macro_rules! option_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }

            /// Case-insensitive; anything else is `None`.
            pub fn parse(s: &str) -> Option<Self> {
                let s = s.trim();
                $(if s.eq_ignore_ascii_case($text) {
                    return Some($ty::$variant);
                })+
                None
            }
        }
    };
}

option_enum!(Gender { Male => "Male", Female => "Female", Other => "Other" });
option_enum!(YesNo { Yes => "Yes", No => "No" });
option_enum!(Diet { Poor => "Poor", Fair => "Fair", Good => "Good", Excellent => "Excellent" });
option_enum!(StressLevel { Low => "Low", Moderate => "Moderate", High => "High" });

/// One submission, typed per question.
///
/// Numeric fields are `None` when the answer was absent or not a number;
/// select fields are `None` when absent or not one of the options. Scoring
/// treats both as "condition not met".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerSet {
    pub age: Option<f64>,
    pub gender: Option<Gender>,
    pub smoker: Option<YesNo>,
    pub exercise: Option<f64>,
    pub diet: Option<Diet>,
    pub sleep: Option<f64>,
    pub stress: Option<StressLevel>,
    pub alcohol: Option<YesNo>,
    pub bmi: Option<f64>,
    pub family_history: Option<YesNo>,
}

impl AnswerSet {
    /// Convert collected answers. Never fails.
    pub fn from_raw(raw: &RawAnswers) -> Self {
        let number = |id| raw.get(id).and_then(parse_number);
        let text = |id| raw.get(id).unwrap_or("");

        Self {
            age: number(QuestionId::Age),
            gender: Gender::parse(text(QuestionId::Gender)),
            smoker: YesNo::parse(text(QuestionId::Smoker)),
            exercise: number(QuestionId::Exercise),
            diet: Diet::parse(text(QuestionId::Diet)),
            sleep: number(QuestionId::Sleep),
            stress: StressLevel::parse(text(QuestionId::Stress)),
            alcohol: YesNo::parse(text(QuestionId::Alcohol)),
            bmi: number(QuestionId::Bmi),
            family_history: YesNo::parse(text(QuestionId::FamilyHistory)),
        }
    }

    /// Numeric answer with absent/non-numeric coerced to 0.
    ///
    /// Select questions always read as 0.
    pub fn number(&self, id: QuestionId) -> f64 {
        self.numeric_field(id).unwrap_or(0.0)
    }

    fn numeric_field(&self, id: QuestionId) -> Option<f64> {
        match id {
            QuestionId::Age => self.age,
            QuestionId::Exercise => self.exercise,
            QuestionId::Sleep => self.sleep,
            QuestionId::Bmi => self.bmi,
            _ => None,
        }
    }

    /// Canonical option text for a select question, if answered.
    pub fn choice(&self, id: QuestionId) -> Option<&'static str> {
        match id {
            QuestionId::Gender => self.gender.map(Gender::as_str),
            QuestionId::Smoker => self.smoker.map(YesNo::as_str),
            QuestionId::Diet => self.diet.map(Diet::as_str),
            QuestionId::Stress => self.stress.map(StressLevel::as_str),
            QuestionId::Alcohol => self.alcohol.map(YesNo::as_str),
            QuestionId::FamilyHistory => self.family_history.map(YesNo::as_str),
            _ => None,
        }
    }

    /// Whether the typed value for `id` is set.
    pub fn has(&self, id: QuestionId) -> bool {
        match id.spec().kind {
            QuestionKind::Number => self.numeric_field(id).is_some(),
            QuestionKind::Select(_) => self.choice(id).is_some(),
        }
    }
}

/// Lenient number parsing. Surrounding whitespace is ignored; blank input,
/// NaN and infinities are `None`.
pub fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(pairs: &[(QuestionId, &str)]) -> RawAnswers {
        let mut answers = RawAnswers::new();
        for (id, value) in pairs {
            answers.set(*id, *value);
        }
        answers
    }

    #[test]
    fn test_from_raw_typed_fields() {
        let answers = AnswerSet::from_raw(&raw(&[
            (QuestionId::Age, "45"),
            (QuestionId::Gender, "Female"),
            (QuestionId::Smoker, "Yes"),
            (QuestionId::Diet, "excellent"),
            (QuestionId::Bmi, " 31.5 "),
        ]));
        assert_eq!(answers.age, Some(45.0));
        assert_eq!(answers.gender, Some(Gender::Female));
        assert_eq!(answers.smoker, Some(YesNo::Yes));
        assert_eq!(answers.diet, Some(Diet::Excellent));
        assert_eq!(answers.bmi, Some(31.5));
        assert!(answers.sleep.is_none());
    }

    #[test]
    fn test_non_numeric_coerces_to_zero() {
        let answers = AnswerSet::from_raw(&raw(&[(QuestionId::Sleep, "lots")]));
        assert!(answers.sleep.is_none());
        assert_eq!(answers.number(QuestionId::Sleep), 0.0);
        assert_eq!(answers.number(QuestionId::Age), 0.0);
    }

    #[test]
    fn test_unknown_option_is_none() {
        let answers = AnswerSet::from_raw(&raw(&[(QuestionId::Stress, "Extreme")]));
        assert!(answers.stress.is_none());
        assert_eq!(answers.choice(QuestionId::Stress), None);
    }

    #[test]
    fn test_choice_and_number_ignore_wrong_kind() {
        let answers = AnswerSet::from_raw(&raw(&[
            (QuestionId::Age, "30"),
            (QuestionId::Smoker, "No"),
        ]));
        assert_eq!(answers.choice(QuestionId::Age), None);
        assert_eq!(answers.number(QuestionId::Smoker), 0.0);
        assert_eq!(answers.choice(QuestionId::Smoker), Some("No"));
        assert!(answers.has(QuestionId::Age));
        assert!(!answers.has(QuestionId::Bmi));
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("3"), Some(3.0));
        assert_eq!(parse_number("2.999"), Some(2.999));
        assert_eq!(parse_number("-1"), Some(-1.0));
        assert_eq!(parse_number("  "), None);
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("+infinity"), None);
        assert_eq!(parse_number("-inf"), None);
    }

    #[test]
    fn test_infinite_answers_coerce_to_zero() {
        let answers = AnswerSet::from_raw(&raw(&[
            (QuestionId::Bmi, "inf"),
            (QuestionId::Age, "infinity"),
        ]));
        assert!(answers.bmi.is_none());
        assert!(answers.age.is_none());
        assert_eq!(answers.number(QuestionId::Bmi), 0.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut answers = raw(&[(QuestionId::Age, "30"), (QuestionId::Bmi, "22")]);
        assert_eq!(answers.len(), 2);
        answers.reset();
        assert!(answers.is_empty());
        assert!(!answers.is_answered(QuestionId::Age));
    }

    #[test]
    fn test_is_answered_rejects_whitespace() {
        let answers = raw(&[(QuestionId::Age, "   ")]);
        assert!(!answers.is_answered(QuestionId::Age));
        assert!(!answers.is_answered(QuestionId::Bmi));
    }

    #[test]
    fn test_parse_assignment() {
        let (id, value) = RawAnswers::parse_assignment("family_history=Yes").unwrap();
        assert_eq!(id, QuestionId::FamilyHistory);
        assert_eq!(value, "Yes");

        assert!(RawAnswers::parse_assignment("smoker").is_err());
        assert!(RawAnswers::parse_assignment("height=180").is_err());
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = raw(&[(QuestionId::Age, "30"), (QuestionId::Smoker, "No")]);
        base.merge(raw(&[(QuestionId::Smoker, "Yes")]));
        assert_eq!(base.get(QuestionId::Age), Some("30"));
        assert_eq!(base.get(QuestionId::Smoker), Some("Yes"));
    }

    #[test]
    fn test_parse_answers_yaml() {
        let yaml = r#"
age: 45
gender: Male
smoker: "Yes"
familyHistory: "No"
bmi: 32
"#;
        let answers = parse_answers_yaml(yaml).unwrap();
        assert_eq!(answers.get(QuestionId::Age), Some("45"));
        assert_eq!(answers.get(QuestionId::Gender), Some("Male"));
        assert_eq!(answers.get(QuestionId::Smoker), Some("Yes"));
        assert_eq!(answers.get(QuestionId::FamilyHistory), Some("No"));
        assert_eq!(answers.get(QuestionId::Bmi), Some("32"));
    }

    #[test]
    fn test_parse_answers_yaml_unknown_id() {
        let err = parse_answers_yaml("height: 180\n").unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn test_parse_answers_yaml_duplicate_alias_rejected() {
        let yaml = "familyHistory: \"No\"\nfamily_history: \"Yes\"\n";
        for _ in 0..20 {
            let err = parse_answers_yaml(yaml).unwrap_err();
            let msg = err.to_string();
            assert!(msg.contains("familyHistory"));
            assert!(msg.contains("family_history"));
        }
    }

    #[test]
    fn test_load_answers_file() {
        let path = std::env::temp_dir().join("wellscore_test_answers.yaml");
        std::fs::write(&path, "sleep: 7\ndiet: Excellent\n").unwrap();

        let answers = load_answers_file(&path).unwrap();
        assert_eq!(answers.get(QuestionId::Sleep), Some("7"));
        assert_eq!(answers.get(QuestionId::Diet), Some("Excellent"));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_answers_file_missing() {
        let path = std::env::temp_dir().join("wellscore_test_answers_missing.yaml");
        let _ = std::fs::remove_file(&path);
        assert!(load_answers_file(&path).is_err());
    }
}
