//! TUI event loop for the browser.

use super::app::App;
use super::terminal::TerminalGuard;
use super::worker::LookupWorker;
use super::{Focus, EVENT_POLL_MS};
use crate::query::QueryController;
use crate::recommend::RecommendationSource;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::backend::CrosstermBackend;
use std::io;
use std::sync::Arc;
use std::time::Duration;

pub(super) fn run_tui(
    controller: QueryController,
    source: Arc<dyn RecommendationSource>,
    recommendation_limit: Option<usize>,
) -> Result<()> {
    let mut app = App::new(controller, LookupWorker::new(source), recommendation_limit);

    let guard = TerminalGuard::enter()?;
    let mut terminal = {
        let stdout = io::stdout();
        let backend = CrosstermBackend::new(stdout);
        ratatui::Terminal::new(backend).context("init terminal")?
    };

    loop {
        app.poll_lookups();
        terminal
            .draw(|frame| app.draw(frame))
            .context("draw browse ui")?;

        if !event::poll(Duration::from_millis(EVENT_POLL_MS)).context("poll event")? {
            continue;
        }
        let Event::Key(key) = event::read().context("read event")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let Some(action) = action_from_key(key, app.focus()) else {
            continue;
        };
        match action {
            Action::Quit => {
                if app.is_help_shown() {
                    app.toggle_help();
                } else if !app.close_suggestions() {
                    break;
                }
            }
            Action::Exit => break,
            Action::NextFocus => app.next_focus(),
            Action::PrevFocus => app.prev_focus(),
            Action::Up => app.move_selection(-1),
            Action::Down => app.move_selection(1),
            Action::PageUp => app.move_selection(-10),
            Action::PageDown => app.move_selection(10),
            Action::Left => app.cycle_filter(-1),
            Action::Right => app.cycle_filter(1),
            Action::Activate => app.activate(),
            Action::Input(ch) => app.input(ch),
            Action::Backspace => app.backspace(),
            Action::ResetFilters => app.reset_filters(),
            Action::ToggleHelp => app.toggle_help(),
        }
    }

    drop(guard);
    terminal.show_cursor().ok();
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Action {
    /// Esc and `q`: closes help or the picklist before quitting.
    Quit,
    Exit,
    NextFocus,
    PrevFocus,
    Up,
    Down,
    PageUp,
    PageDown,
    Left,
    Right,
    Activate,
    Input(char),
    Backspace,
    ResetFilters,
    ToggleHelp,
}

fn action_from_key(key: KeyEvent, focus: Focus) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Exit),
            _ => None,
        };
    }
    match key.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab => Some(Action::NextFocus),
        KeyCode::BackTab => Some(Action::PrevFocus),
        KeyCode::Up => Some(Action::Up),
        KeyCode::Down => Some(Action::Down),
        KeyCode::PageUp => Some(Action::PageUp),
        KeyCode::PageDown => Some(Action::PageDown),
        KeyCode::Left => Some(Action::Left),
        KeyCode::Right => Some(Action::Right),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::F(1) => Some(Action::ToggleHelp),
        KeyCode::Char(ch) => match focus {
            Focus::Search => Some(Action::Input(ch)),
            Focus::Filters => match ch {
                'x' => Some(Action::ResetFilters),
                'q' => Some(Action::Quit),
                'k' => Some(Action::Up),
                'j' => Some(Action::Down),
                _ => Some(Action::Input(ch)),
            },
            Focus::Results | Focus::Recommendations => match ch {
                'q' => Some(Action::Quit),
                'k' => Some(Action::Up),
                'j' => Some(Action::Down),
                '?' => Some(Action::ToggleHelp),
                _ => None,
            },
        },
        _ => None,
    }
}
