//! Terminal setup, teardown, and main event loop.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;
use tracing::info;

use roster_core::Roster;

use crate::app::RosterApp;
use crate::views;

/// Launch the TUI application.
pub fn run<R: Roster>(mut app: RosterApp<R>) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(|e| format!("terminal error: {e}"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

/// Main event loop.
fn run_loop<R: Roster>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut RosterApp<R>,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|frame| views::draw(frame, app))
            .map_err(|e| format!("draw error: {e}"))?;

        if app.should_quit {
            return Ok(());
        }

        if let Event::Key(key) = event::read().map_err(|e| format!("event error: {e}"))?
            && key.kind == KeyEventKind::Press
        {
            handle_key(app, key);
        }
    }
}

fn handle_key<R: Roster>(app: &mut RosterApp<R>, key: KeyEvent) {
    // Ctrl+C leaves without saving.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        info!("interrupted, exiting without saving");
        app.should_quit = true;
        return;
    }
    app.handle_key(key);
}
