use std::io::IsTerminal;
use owo_colors::OwoColorize;
use terminal_size::{Width, terminal_size};

use crate::questionnaire::{QuestionKind, QUESTIONS};
use crate::scoring::{ScoreKind, ScoreResult, MAX_SCORE};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_text(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn kind_title(kind: ScoreKind) -> &'static str {
    match kind {
        ScoreKind::Risk => "Risk Score",
        ScoreKind::Wellness => "Wellness Score",
    }
}

fn kind_key(kind: ScoreKind) -> &'static str {
    match kind {
        ScoreKind::Risk => "risk",
        ScoreKind::Wellness => "wellness",
    }
}

/// Format "Risk Score: 75 / 100". Colour follows what the score means:
/// a high risk score is bad, a high wellness score is good.
pub fn format_score_line(result: &ScoreResult, kind: ScoreKind, use_colors: bool) -> String {
    let title = kind_title(kind);
    let score = result.score(kind);

    if use_colors {
        let good = match kind {
            ScoreKind::Risk => score < 40,
            ScoreKind::Wellness => score >= 40,
        };
        let value = if good {
            score.green().bold().to_string()
        } else {
            score.red().bold().to_string()
        };
        format!("{}: {} / {}", title.bold(), value, MAX_SCORE)
    } else {
        format!("{}: {} / {}", title, score, MAX_SCORE)
    }
}

/// Format both scores with their peer comparison sentences.
///
/// Layout mirrors the results page:
/// ```text
/// Risk Score: 75 / 100
/// Your risk is lower than approximately 40% of peers in your age/gender group.
/// Wellness Score: 0 / 100
/// Your wellness score is higher than approximately 53% of peers like you.
/// ```
pub fn format_result(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::new();
    for kind in [ScoreKind::Risk, ScoreKind::Wellness] {
        lines.push(format_score_line(result, kind, use_colors));
        let comparison = result.comparison(kind);
        if use_colors {
            lines.push(comparison.dimmed().to_string());
        } else {
            lines.push(comparison.to_string());
        }
    }
    lines.join("\n")
}

/// List the rules that contributed to each score.
pub fn format_breakdown(result: &ScoreResult, use_colors: bool) -> String {
    let mut lines = Vec::new();

    for kind in [ScoreKind::Risk, ScoreKind::Wellness] {
        let contributions = result.contributions(kind);
        let total = match kind {
            ScoreKind::Risk => result.breakdown.risk_total,
            ScoreKind::Wellness => result.breakdown.wellness_total,
        };

        let header = format!("{} breakdown (total {})", kind_title(kind), total);
        if use_colors {
            lines.push(header.bold().to_string());
        } else {
            lines.push(header);
        }

        if contributions.is_empty() {
            lines.push("  (no rules matched)".to_string());
        }
        for c in contributions {
            let points = format!("+{:<3}", c.points);
            if use_colors {
                lines.push(format!("  {} {}  {}", points.cyan(), c.label, c.description.dimmed()));
            } else {
                lines.push(format!("  {} {}  {}", points, c.label, c.description));
            }
        }
    }

    lines.join("\n")
}

/// Tab-separated values for scripting.
/// Columns: kind, score, comparison (no headers, no colors)
pub fn format_tsv(result: &ScoreResult) -> String {
    [ScoreKind::Risk, ScoreKind::Wellness]
        .iter()
        .map(|&kind| {
            format!(
                "{}\t{}\t{}",
                kind_key(kind),
                result.score(kind),
                result.comparison(kind)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_json(result: &ScoreResult) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// One line per question: index, id, kind (with options), prompt.
/// Prompts are truncated to the terminal width when writing to a terminal.
pub fn format_question_list(use_colors: bool) -> String {
    let term_width = if should_use_colors() {
        get_terminal_width()
    } else {
        None
    };

    let id_width = QUESTIONS
        .iter()
        .map(|q| q.id.key().len())
        .max()
        .unwrap_or(0);

    QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let index_str = format!("{:>2}.", idx + 1);
            let id_str = format!("{:<width$}", q.id.key(), width = id_width);
            let kind_str = match q.kind {
                QuestionKind::Number => q.kind.name().to_string(),
                QuestionKind::Select(options) => options.join("/"),
            };

            let fixed_width = index_str.len() + 1 + id_width + 2 + kind_str.chars().count() + 2;
            let prompt = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate_text(q.prompt, width - fixed_width)
                }
                Some(_) => truncate_text(q.prompt, 20),
                None => q.prompt.to_string(),
            };

            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    index_str.dimmed(),
                    id_str.bold(),
                    kind_str.cyan(),
                    prompt
                )
            } else {
                format!("{} {}  {}  {}", index_str, id_str, kind_str, prompt)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
