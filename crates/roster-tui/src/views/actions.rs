//! Left-hand action panel.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem};

use roster_core::Roster;

use crate::app::{ListTab, MIN_USERS_TO_PICK, RosterApp};

/// Draw the key legend, greying out actions that are unavailable.
pub fn draw<R: Roster>(frame: &mut Frame, app: &RosterApp<R>, area: Rect) {
    let can_pick = app.roster.active_count() >= MIN_USERS_TO_PICK;
    let can_reactivate = app.tab == ListTab::Inactive && !app.roster.inactive().is_empty();

    let actions = [
        ("p", "Pick Random User", can_pick, Color::Blue),
        ("x", "I Quit", app.can_quit(), Color::Red),
        ("a", "Add User", true, Color::Green),
        ("r", "Reactivate User", can_reactivate, Color::Cyan),
        ("R", "Reset All Users", true, Color::Magenta),
        ("Tab", "Switch List", true, Color::White),
        ("s", "Save & Exit", true, Color::Gray),
    ];

    let items: Vec<ListItem> = actions
        .iter()
        .map(|(key, label, enabled, color)| {
            let (key_style, label_style) = if *enabled {
                (
                    Style::default().fg(Color::Yellow).bold(),
                    Style::default().fg(*color),
                )
            } else {
                (
                    Style::default().fg(Color::DarkGray),
                    Style::default().fg(Color::DarkGray),
                )
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {key:>3} "), key_style),
                Span::styled(*label, label_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Actions ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Magenta)),
    );
    frame.render_widget(list, area);
}
