//! Rendering for the roster TUI.

pub mod actions;
pub mod popup;
pub mod users;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

use roster_core::Roster;

use crate::app::RosterApp;

/// Draw the whole screen.
pub fn draw<R: Roster>(frame: &mut Frame, app: &RosterApp<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let header = Paragraph::new(Line::from("Random User Picker").bold())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(header, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    actions::draw(frame, app, columns[0]);
    users::draw(frame, app, columns[1]);

    let status = Paragraph::new(Line::from(vec![
        Span::raw(format!(" {} ", app.status)),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.counts_line()),
    ]))
    .style(Style::default().fg(Color::Black).bg(Color::White));
    frame.render_widget(status, chunks[2]);

    if let Some(popup) = &app.popup {
        popup::draw(frame, popup);
    }
}
