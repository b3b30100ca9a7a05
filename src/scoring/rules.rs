use crate::questionnaire::{AnswerSet, QuestionId};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Condition {
    /// Select answer equals the given option.
    Equals(QuestionId, &'static str),
    /// Numeric answer (absent/non-numeric read as 0) is at least the threshold.
    AtLeast(QuestionId, f64),
}

impl Condition {
    pub fn matches(&self, answers: &AnswerSet) -> bool {
        match self {
            Condition::Equals(id, option) => answers.choice(*id) == Some(*option),
            Condition::AtLeast(id, threshold) => answers.number(*id) >= *threshold,
        }
    }

    pub fn question(&self) -> QuestionId {
        match self {
            Condition::Equals(id, _) | Condition::AtLeast(id, _) => *id,
        }
    }

    /// e.g. "smoker = Yes", "bmi >= 30"
    pub fn describe(&self) -> String {
        match self {
            Condition::Equals(id, option) => format!("{} = {}", id, option),
            Condition::AtLeast(id, threshold) => format!("{} >= {}", id, threshold),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rule {
    pub label: &'static str,
    pub condition: Condition,
    pub points: u32,
}

pub const RISK_RULES: &[Rule] = &[
    Rule {
        label: "Smoker",
        condition: Condition::Equals(QuestionId::Smoker, "Yes"),
        points: 25,
    },
    Rule {
        label: "High stress",
        condition: Condition::Equals(QuestionId::Stress, "High"),
        points: 15,
    },
    Rule {
        label: "Family history",
        condition: Condition::Equals(QuestionId::FamilyHistory, "Yes"),
        points: 20,
    },
    Rule {
        label: "BMI 30+",
        condition: Condition::AtLeast(QuestionId::Bmi, 30.0),
        points: 15,
    },
];

pub const WELLNESS_RULES: &[Rule] = &[
    Rule {
        label: "Exercise 3+ days",
        condition: Condition::AtLeast(QuestionId::Exercise, 3.0),
        points: 20,
    },
    Rule {
        label: "Excellent diet",
        condition: Condition::Equals(QuestionId::Diet, "Excellent"),
        points: 25,
    },
    Rule {
        label: "Sleep 7+ hours",
        condition: Condition::AtLeast(QuestionId::Sleep, 7.0),
        points: 15,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::questionnaire::{Diet, YesNo};

    #[test]
    fn test_equals_matches_option() {
        let answers = AnswerSet {
            smoker: Some(YesNo::Yes),
            ..Default::default()
        };
        assert!(Condition::Equals(QuestionId::Smoker, "Yes").matches(&answers));
        assert!(!Condition::Equals(QuestionId::Smoker, "No").matches(&answers));
    }

    #[test]
    fn test_equals_absent_never_matches() {
        let answers = AnswerSet::default();
        assert!(!Condition::Equals(QuestionId::Diet, "Excellent").matches(&answers));
    }

    #[test]
    fn test_at_least_inclusive() {
        let at = AnswerSet {
            bmi: Some(30.0),
            ..Default::default()
        };
        let below = AnswerSet {
            bmi: Some(29.99),
            ..Default::default()
        };
        let cond = Condition::AtLeast(QuestionId::Bmi, 30.0);
        assert!(cond.matches(&at));
        assert!(!cond.matches(&below));
    }

    #[test]
    fn test_at_least_absent_reads_zero() {
        let answers = AnswerSet::default();
        assert!(!Condition::AtLeast(QuestionId::Sleep, 7.0).matches(&answers));
        // a zero threshold is met by an absent answer
        assert!(Condition::AtLeast(QuestionId::Sleep, 0.0).matches(&answers));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            Condition::Equals(QuestionId::FamilyHistory, "Yes").describe(),
            "familyHistory = Yes"
        );
        assert_eq!(Condition::AtLeast(QuestionId::Bmi, 30.0).describe(), "bmi >= 30");
    }

    #[test]
    fn test_rule_tables() {
        let risk: u32 = RISK_RULES.iter().map(|r| r.points).sum();
        let wellness: u32 = WELLNESS_RULES.iter().map(|r| r.points).sum();
        assert_eq!(risk, 75);
        assert_eq!(wellness, 60);

        let answers = AnswerSet {
            diet: Some(Diet::Excellent),
            ..Default::default()
        };
        let fired: Vec<_> = WELLNESS_RULES
            .iter()
            .filter(|r| r.condition.matches(&answers))
            .map(|r| r.condition.question())
            .collect();
        assert_eq!(fired, vec![QuestionId::Diet]);
    }
}
