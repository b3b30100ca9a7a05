use ratatui::prelude::*;
use ratatui::widgets::{Block, Cell, Clear, Paragraph, Row, Table, Wrap};

use crate::questionnaire::{QuestionKind, QUESTIONS};
use crate::scoring::{ScoreKind, ScoreResult, MAX_SCORE};
use crate::tui::app::{App, FlashKind, InputMode, View, SUBMIT_ROW};
use crate::tui::theme::ThemeColors;

const TITLE: &str = "Health Assessment";
const BAR_WIDTH: usize = 20;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    // Handle very small terminal sizes gracefully
    if area.height < 8 || area.width < 40 {
        let msg = Paragraph::new("Terminal too small").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    // Layout: Title(1) + Body(fill) + Status(1)
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);

    render_title(frame, chunks[0], app);
    match app.view {
        View::Form => render_form(frame, chunks[1], app),
        View::Results => render_results(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if app.input_mode == InputMode::Help {
        render_help_popup(frame, &app.theme);
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(TITLE, Style::default().fg(theme.title_color).bold())];

    let progress = match app.view {
        View::Form => format!("{}/{} answered", app.answered_count(), QUESTIONS.len()),
        View::Results => "Results".to_string(),
    };
    let padding_len = (area.width as usize).saturating_sub(TITLE.len() + progress.len());
    spans.push(Span::raw(" ".repeat(padding_len)));
    spans.push(Span::styled(progress, Style::default().fg(theme.muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::vertical([Constraint::Fill(1), Constraint::Length(2)]).split(area);
    let selected = app.selected_row();
    let theme = &app.theme;

    let mut rows: Vec<Row> = QUESTIONS
        .iter()
        .enumerate()
        .map(|(idx, question)| {
            let value = app.answers.get(question.id);
            let is_selected = idx == selected;

            let answer = match (value, question.kind) {
                (Some(v), QuestionKind::Select(_)) if is_selected => {
                    Span::styled(format!("< {} >", v), Style::default().fg(theme.answered))
                }
                (Some(v), QuestionKind::Number) if is_selected => {
                    Span::styled(format!("{}_", v), Style::default().fg(theme.answered))
                }
                (Some(v), _) => Span::styled(v.to_string(), Style::default().fg(theme.answered)),
                (None, QuestionKind::Number) if is_selected => {
                    Span::styled("_", Style::default().fg(theme.unanswered))
                }
                (None, QuestionKind::Select(_)) if is_selected => {
                    Span::styled("< choose >", Style::default().fg(theme.unanswered))
                }
                (None, _) => Span::styled("-", Style::default().fg(theme.unanswered)),
            };

            // Alternating row background (odd rows get subtle background)
            let row_style = if idx % 2 == 1 {
                Style::default().bg(theme.row_alt_bg)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}.", idx + 1)).style(Style::default().fg(theme.index_color)),
                Cell::from(question.prompt),
                Cell::from(Line::from(answer)),
            ])
            .style(row_style)
        })
        .collect();

    rows.push(
        Row::new(vec![
            Cell::from(""),
            Cell::from(Span::styled(
                " Calculate ",
                Style::default().fg(theme.button_fg).bg(theme.button_bg).bold(),
            )),
            Cell::from(""),
        ])
        .top_margin(1),
    );

    let widths = [
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["#", "Question", "Answer"])
                .style(theme.header_style)
                .bottom_margin(1),
        )
        .row_highlight_style(theme.row_selected);

    let hint = question_hint(app);
    let hint_style = Style::default().fg(app.theme.muted);

    frame.render_stateful_widget(table, chunks[0], &mut app.table_state);
    frame.render_widget(
        Paragraph::new(hint).style(hint_style).wrap(Wrap { trim: true }),
        chunks[1],
    );
}

/// One-line help for the row under the cursor.
fn question_hint(app: &App) -> String {
    if app.selected_row() == SUBMIT_ROW {
        return "Press Enter to calculate your scores".to_string();
    }
    match app.selected_question().map(|q| q.kind) {
        Some(QuestionKind::Select(options)) => {
            format!("Options: {}  (Left/Right to change)", options.join(" / "))
        }
        Some(QuestionKind::Number) => "Type a number  (Backspace to edit)".to_string(),
        None => String::new(),
    }
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let Some(result) = &app.result else {
        let msg = Paragraph::new("No result yet").alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    };
    let theme = &app.theme;

    let mut lines = Vec::new();
    for kind in [ScoreKind::Risk, ScoreKind::Wellness] {
        lines.extend(score_section(result, kind, theme));
        lines.push(Line::from(""));
    }

    if app.show_breakdown {
        for kind in [ScoreKind::Risk, ScoreKind::Wellness] {
            lines.extend(breakdown_section(result, kind, theme));
            lines.push(Line::from(""));
        }
    }

    lines.push(Line::from(vec![
        Span::styled(
            " Retake Assessment ",
            Style::default().fg(theme.button_fg).bg(theme.button_bg).bold(),
        ),
        Span::styled("  press r or Enter", Style::default().fg(theme.muted)),
    ]));

    let block = Block::bordered()
        .title(" Your Results ")
        .title_style(Style::default().fg(theme.title_color).bold());
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        area,
    );
}

fn kind_title(kind: ScoreKind) -> &'static str {
    match kind {
        ScoreKind::Risk => "Risk Score",
        ScoreKind::Wellness => "Wellness Score",
    }
}

fn score_section(result: &ScoreResult, kind: ScoreKind, theme: &ThemeColors) -> Vec<Line<'static>> {
    let score = result.score(kind);
    let color = theme.score_color(kind, score);

    let mut header = vec![
        Span::styled(format!("{}: ", kind_title(kind)), Style::default().bold()),
        Span::styled(format!("{:>3}", score), Style::default().fg(color).bold()),
        Span::raw(format!(" / {}  ", MAX_SCORE)),
    ];
    header.extend(score_bar(score, BAR_WIDTH, color, theme.bar_empty).spans);

    vec![
        Line::from(header),
        Line::from(Span::raw(result.comparison(kind).to_string())),
    ]
}

fn breakdown_section(
    result: &ScoreResult,
    kind: ScoreKind,
    theme: &ThemeColors,
) -> Vec<Line<'static>> {
    let contributions = result.contributions(kind);
    let total = match kind {
        ScoreKind::Risk => result.breakdown.risk_total,
        ScoreKind::Wellness => result.breakdown.wellness_total,
    };

    let mut lines = vec![Line::from(Span::styled(
        format!("{} breakdown (total {})", kind_title(kind), total),
        theme.header_style,
    ))];
    if contributions.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (no rules matched)",
            Style::default().fg(theme.muted),
        )));
    }
    for c in contributions {
        lines.push(Line::from(vec![
            Span::styled(format!("  +{:<3} ", c.points), Style::default().fg(theme.status_key_color)),
            Span::raw(format!("{:<18}", c.label)),
            Span::styled(c.description.clone(), Style::default().fg(theme.muted)),
        ]));
    }
    lines
}

fn score_bar(score: u8, width: usize, fill: Color, empty_color: Color) -> Line<'static> {
    let ratio = (f64::from(score) / f64::from(MAX_SCORE)).min(1.0);
    let filled = (ratio * width as f64).round() as usize;
    let empty = width.saturating_sub(filled);

    let mut spans = Vec::new();
    if filled > 0 {
        spans.push(Span::styled("█".repeat(filled), Style::default().fg(fill)));
    }
    if empty > 0 {
        spans.push(Span::styled("░".repeat(empty), Style::default().fg(empty_color)));
    }
    Line::from(spans)
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;

    let text = if let Some((ref msg, kind, _)) = app.flash_message {
        let msg_color = match kind {
            FlashKind::Error => theme.flash_error,
            FlashKind::Success => theme.flash_success,
            FlashKind::Info => theme.muted,
        };
        Line::from(Span::styled(msg.clone(), Style::default().fg(msg_color)))
    } else {
        let hints: &[(&str, &str)] = match app.view {
            View::Form => &[
                ("j/k", ":nav "),
                ("←/→", ":choose "),
                ("Enter", ":calculate "),
                ("Del", ":clear "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
            View::Results => &[
                ("r", ":retake "),
                ("b", ":breakdown "),
                ("?", ":help "),
                ("q", ":quit"),
            ],
        };

        let mut spans = Vec::new();
        for (i, (key, label)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(*key, Style::default().fg(theme.status_key_color)));
            spans.push(Span::raw(*label));
        }
        Line::from(spans)
    };

    frame.render_widget(
        Paragraph::new(text).style(Style::default().bg(theme.status_bar_bg)),
        area,
    );
}

/// Create a centered rectangle with fixed width and height
fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);

    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;

    Rect {
        x,
        y,
        width,
        height,
    }
}

fn render_help_popup(frame: &mut Frame, theme: &ThemeColors) {
    let popup_area = centered_rect_fixed(52, 17, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::bordered()
        .title(" Keyboard Shortcuts ")
        .title_style(theme.popup_title)
        .border_style(Style::default().fg(theme.popup_border))
        .style(Style::default().bg(theme.popup_bg));
    frame.render_widget(block.clone(), popup_area);
    let inner = block.inner(popup_area);

    let entries = [
        ("j / Down / Tab", "Next question"),
        ("k / Up", "Previous question"),
        ("0-9 . -", "Type a numeric answer"),
        ("Backspace", "Delete last character"),
        ("Delete", "Clear answer"),
        ("Left / Right", "Change selected option"),
        ("Enter", "Calculate (on the button)"),
        ("Ctrl-s", "Calculate from anywhere"),
        ("r", "Retake assessment (results)"),
        ("b", "Show/hide score breakdown"),
        ("?", "Show/hide this help"),
        ("q / Ctrl-c", "Quit"),
    ];

    let key_style = Style::default().fg(theme.status_key_color).bold();
    let mut help_lines: Vec<Line> = entries
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{:<16}", key), key_style),
                Span::raw(*what),
            ])
        })
        .collect();
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(theme.muted),
    )));

    frame.render_widget(Paragraph::new(help_lines), inner);
}
