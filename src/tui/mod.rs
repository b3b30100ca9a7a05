pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::{resolve_theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer stderr while TUI is active to prevent output corrupting the display
    crate::stderr_buffer::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            Some(Event::Resize) => {}
            None => {
                tracing::debug!("input stream closed");
                break Ok(());
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered stderr messages now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprintln!("{}", msg);
    }

    outcome
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if app.input_mode == app::InputMode::Help {
        // Any key exits help
        app.dismiss_help();
        return;
    }

    // Global keys
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('?') => {
            app.show_help();
            return;
        }
        _ => {}
    }

    match app.view {
        app::View::Form => match key.code {
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => app.submit(),

            // Navigation
            KeyCode::Down | KeyCode::Tab => app.next_row(),
            KeyCode::Up | KeyCode::BackTab => app.previous_row(),
            KeyCode::Char('j') => app.next_row(),
            KeyCode::Char('k') => app.previous_row(),

            // Option selection
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => app.cycle_option(true),
            KeyCode::Left | KeyCode::Char('h') => app.cycle_option(false),

            KeyCode::Backspace => app.backspace(),
            KeyCode::Delete => app.clear_selected(),

            KeyCode::Enter => {
                if app.selected_row() == app::SUBMIT_ROW {
                    app.submit();
                } else {
                    app.next_row();
                }
            }

            KeyCode::Char(c) => {
                app.input_char(c);
            }

            _ => {}
        },
        app::View::Results => match key.code {
            KeyCode::Char('r') | KeyCode::Enter => app.retake(),
            KeyCode::Char('b') => app.toggle_breakdown(),
            _ => {}
        },
    }
}
