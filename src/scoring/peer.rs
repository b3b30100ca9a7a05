//! Peer comparison sentence.
//!
//! A fixed linear heuristic, not population data: start from a gender
//! baseline, shift it by age bracket, and average it with the score's
//! distance from 100.

use serde::Serialize;

use crate::questionnaire::Gender;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreKind {
    Risk,
    Wellness,
}

/// 60 for Female, 55 for everyone else (Male, Other, unanswered).
pub fn gender_base(gender: Option<Gender>) -> i64 {
    match gender {
        Some(Gender::Female) => 60,
        _ => 55,
    }
}

pub fn age_factor(age: f64) -> i64 {
    if age < 40.0 {
        5
    } else if age < 60.0 {
        0
    } else {
        -5
    }
}

/// `round(((100 - score) + base + age_factor) / 2)`, halves rounding up.
///
/// Not clamped: scores outside 0..=100 give percentiles outside it too.
pub fn peer_percentile(age: f64, gender: Option<Gender>, score: i64) -> i64 {
    let adjusted_base = gender_base(gender) + age_factor(age);
    let sum = (100 - score) + adjusted_base;
    // floor((sum + 1) / 2) is round-half-up for integer sum / 2
    (sum + 1).div_euclid(2)
}

pub fn peer_comparison(age: f64, gender: Option<Gender>, score: i64, kind: ScoreKind) -> String {
    let percentile = peer_percentile(age, gender, score);
    match kind {
        ScoreKind::Risk => format!(
            "Your risk is lower than approximately {}% of peers in your age/gender group.",
            percentile
        ),
        ScoreKind::Wellness => format!(
            "Your wellness score is higher than approximately {}% of peers like you.",
            percentile
        ),
    }
}
