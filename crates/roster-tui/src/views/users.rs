//! Right-hand panel: current pick, list tabs and the user list.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs};

use roster_core::Roster;

use crate::app::{ListTab, RosterApp};

/// Draw the selected user, the tab strip and the shown list.
pub fn draw<R: Roster>(frame: &mut Frame, app: &RosterApp<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Selected user
            Constraint::Length(1), // Tabs
            Constraint::Min(0),    // List
        ])
        .split(area);

    draw_selected(frame, app, chunks[0]);

    let tabs = Tabs::new(vec!["Active Users", "Inactive Users"])
        .select(app.tab.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Green).bold())
        .divider(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
    frame.render_widget(tabs, chunks[1]);

    draw_list(frame, app, chunks[2]);
}

fn draw_selected<R: Roster>(frame: &mut Frame, app: &RosterApp<R>, area: Rect) {
    let lines = match app.roster.last_selected() {
        Some(user) => vec![
            Line::from(Span::styled(
                format!("Selected: {}", user.name),
                Style::default().fg(Color::Yellow).bold(),
            )),
            Line::from(format!("Times Picked: {}", user.times_picked)),
        ],
        None => vec![Line::from(Span::styled(
            "No User Selected",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow)),
    );
    frame.render_widget(p, area);
}

fn draw_list<R: Roster>(frame: &mut Frame, app: &RosterApp<R>, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let users = app.shown_users();
    if users.is_empty() {
        let text = match app.tab {
            ListTab::Active => "No active users",
            ListTab::Inactive => "No inactive users",
        };
        let p = Paragraph::new(Span::styled(text, Style::default().fg(Color::DarkGray)))
            .block(block);
        frame.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = users
        .iter()
        .map(|u| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<20}", u.name), Style::default().fg(Color::White)),
                Span::styled(
                    format!("This session: {:<4}", u.picked_this_instance),
                    Style::default().fg(Color::Cyan),
                ),
                Span::styled(
                    format!("All time: {}", u.times_picked),
                    Style::default().fg(Color::Magenta),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    state.select(Some(app.highlight));
    frame.render_stateful_widget(list, area, &mut state);
}
