pub mod engine;
pub mod peer;
pub mod rules;

pub use engine::{compute_scores, RuleContribution, ScoreBreakdown, ScoreResult, MAX_SCORE};
pub use peer::{peer_comparison, peer_percentile, ScoreKind};
pub use rules::{Condition, Rule, RISK_RULES, WELLNESS_RULES};
