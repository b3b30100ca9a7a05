use serde::Serialize;

use super::peer::{peer_comparison, ScoreKind};
use super::rules::{Rule, RISK_RULES, WELLNESS_RULES};
use crate::questionnaire::{AnswerSet, QuestionId};

/// Upper bound for both scores.
pub const MAX_SCORE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleContribution {
    pub label: String,       // e.g. "Smoker", "Sleep 7+ hours"
    pub description: String, // e.g. "smoker = Yes", "sleep >= 7"
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    /// Sum of fired risk rules before clamping
    pub risk_total: u32,
    /// Sum of fired wellness rules before clamping
    pub wellness_total: u32,
    pub risk: Vec<RuleContribution>,
    pub wellness: Vec<RuleContribution>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreResult {
    pub risk_score: u8,
    pub wellness_score: u8,
    pub risk_comparison: String,
    pub wellness_comparison: String,
    pub breakdown: ScoreBreakdown,
}

impl ScoreResult {
    pub fn score(&self, kind: ScoreKind) -> u8 {
        match kind {
            ScoreKind::Risk => self.risk_score,
            ScoreKind::Wellness => self.wellness_score,
        }
    }

    pub fn comparison(&self, kind: ScoreKind) -> &str {
        match kind {
            ScoreKind::Risk => &self.risk_comparison,
            ScoreKind::Wellness => &self.wellness_comparison,
        }
    }

    pub fn contributions(&self, kind: ScoreKind) -> &[RuleContribution] {
        match kind {
            ScoreKind::Risk => &self.breakdown.risk,
            ScoreKind::Wellness => &self.breakdown.wellness,
        }
    }
}

/// Score one submission. Pure and total: any AnswerSet yields a result.
pub fn compute_scores(answers: &AnswerSet) -> ScoreResult {
    let (risk_total, risk) = accumulate(RISK_RULES, answers);
    let (wellness_total, wellness) = accumulate(WELLNESS_RULES, answers);

    let risk_score = clamp_score(risk_total);
    let wellness_score = clamp_score(wellness_total);

    let age = answers.number(QuestionId::Age);
    let gender = answers.gender;

    tracing::debug!(
        risk_total,
        wellness_total,
        risk_rules = risk.len(),
        wellness_rules = wellness.len(),
        "computed scores"
    );

    ScoreResult {
        risk_score,
        wellness_score,
        risk_comparison: peer_comparison(age, gender, risk_score.into(), ScoreKind::Risk),
        wellness_comparison: peer_comparison(
            age,
            gender,
            wellness_score.into(),
            ScoreKind::Wellness,
        ),
        breakdown: ScoreBreakdown {
            risk_total,
            wellness_total,
            risk,
            wellness,
        },
    }
}

/// Sum the points of every rule whose condition holds. Order does not
/// matter; each rule contributes at most once.
pub fn accumulate(rules: &[Rule], answers: &AnswerSet) -> (u32, Vec<RuleContribution>) {
    let mut total = 0;
    let mut contributions = Vec::new();

    for rule in rules {
        if rule.condition.matches(answers) {
            total += rule.points;
            contributions.push(RuleContribution {
                label: rule.label.to_string(),
                description: rule.condition.describe(),
                points: rule.points,
            });
        }
    }

    (total, contributions)
}

/// `min(total, 100)`. Contributions are never negative, so no lower clamp.
pub fn clamp_score(total: u32) -> u8 {
    total.min(MAX_SCORE) as u8
}
