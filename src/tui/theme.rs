//! Centralized theme module for TUI color constants and styles

use ratatui::prelude::*;

use crate::config::ThemeMode;
use crate::scoring::{ScoreKind, MAX_SCORE};

/// Complete color palette for the TUI
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Traffic light for score meaning (good/caution/bad)
    pub score_good: Color,
    pub score_mid: Color,
    pub score_bad: Color,

    pub bar_empty: Color,

    // Form rows
    pub row_alt_bg: Color,
    pub index_color: Color,
    pub answered: Color,
    pub unanswered: Color,
    pub row_selected: Style,

    // General colors
    pub muted: Color,
    pub title_color: Color,
    pub header_style: Style,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_key_color: Color,
    pub flash_success: Color,
    pub flash_error: Color,

    // Popup overlay colors
    pub popup_border: Color,
    pub popup_title: Style,
    pub popup_bg: Color,

    // Submit button
    pub button_fg: Color,
    pub button_bg: Color,
}

impl ThemeColors {
    pub fn dark() -> Self {
        Self {
            score_good: Color::Green,
            score_mid: Color::Yellow,
            score_bad: Color::Red,
            bar_empty: Color::DarkGray,
            row_alt_bg: Color::Indexed(235),
            index_color: Color::DarkGray,
            answered: Color::White,
            unanswered: Color::DarkGray,
            row_selected: Style::new().reversed(),
            muted: Color::Gray,
            title_color: Color::Cyan,
            header_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(236),
            status_key_color: Color::Cyan,
            flash_success: Color::Green,
            flash_error: Color::Red,
            popup_border: Color::Cyan,
            popup_title: Style::new().fg(Color::Cyan).bold(),
            popup_bg: Color::Indexed(234),
            button_fg: Color::White,
            button_bg: Color::Rgb(37, 99, 235),
        }
    }

    pub fn light() -> Self {
        Self {
            score_good: Color::Rgb(0, 128, 0),
            score_mid: Color::Rgb(176, 112, 0),
            score_bad: Color::Rgb(192, 0, 0),
            bar_empty: Color::Indexed(250),
            row_alt_bg: Color::Indexed(254),
            index_color: Color::Indexed(244),
            answered: Color::Black,
            unanswered: Color::Indexed(245),
            row_selected: Style::new().reversed(),
            muted: Color::Indexed(242),
            title_color: Color::Blue,
            header_style: Style::new().bold(),
            status_bar_bg: Color::Indexed(253),
            status_key_color: Color::Blue,
            flash_success: Color::Rgb(0, 128, 0),
            flash_error: Color::Rgb(192, 0, 0),
            popup_border: Color::Blue,
            popup_title: Style::new().fg(Color::Blue).bold(),
            popup_bg: Color::Indexed(255),
            button_fg: Color::White,
            button_bg: Color::Rgb(37, 99, 235),
        }
    }

    /// Color for a score by what it means: high risk is bad, high wellness
    /// is good.
    pub fn score_color(&self, kind: ScoreKind, score: u8) -> Color {
        let percentage = f64::from(score) / f64::from(MAX_SCORE) * 100.0;
        let goodness = match kind {
            ScoreKind::Risk => 100.0 - percentage,
            ScoreKind::Wellness => percentage,
        };

        if goodness >= 60.0 {
            self.score_good
        } else if goodness >= 30.0 {
            self.score_mid
        } else {
            self.score_bad
        }
    }
}

/// Resolve a configured mode into a palette. `Auto` asks the terminal for
/// its background luma and falls back to dark when it cannot tell.
pub fn resolve_theme(mode: ThemeMode) -> ThemeColors {
    match mode {
        ThemeMode::Dark => ThemeColors::dark(),
        ThemeMode::Light => ThemeColors::light(),
        ThemeMode::Auto => match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => ThemeColors::light(),
            Ok(_) => ThemeColors::dark(),
            Err(e) => {
                tracing::debug!("terminal background detection failed: {}", e);
                ThemeColors::dark()
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_colors_invert() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.score_color(ScoreKind::Risk, 0), theme.score_good);
        assert_eq!(theme.score_color(ScoreKind::Risk, 50), theme.score_mid);
        assert_eq!(theme.score_color(ScoreKind::Risk, 75), theme.score_bad);
    }

    #[test]
    fn test_wellness_colors() {
        let theme = ThemeColors::dark();
        assert_eq!(theme.score_color(ScoreKind::Wellness, 0), theme.score_bad);
        assert_eq!(theme.score_color(ScoreKind::Wellness, 45), theme.score_mid);
        assert_eq!(theme.score_color(ScoreKind::Wellness, 60), theme.score_good);
    }

    #[test]
    fn test_explicit_modes() {
        assert_eq!(resolve_theme(ThemeMode::Light).answered, Color::Black);
        assert_eq!(resolve_theme(ThemeMode::Dark).answered, Color::White);
    }
}
