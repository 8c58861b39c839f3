//! Modal popups: messages and the add-user prompt.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::Popup;
use crate::shared::centered_rect;

/// Draw the open popup over everything else.
pub fn draw(frame: &mut Frame, popup: &Popup) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);

    match popup {
        Popup::Message { title, body, .. } => {
            let text = vec![
                Line::from(body.as_str()),
                Line::from(""),
                Line::from(Span::styled(
                    "[ OK ]  Enter",
                    Style::default().fg(Color::Yellow).bold(),
                )),
            ];
            let p = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(
                    Block::default()
                        .title(format!(" {title} "))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Cyan)),
                );
            frame.render_widget(p, area);
        }
        Popup::AddUser { input } => {
            let block = Block::default()
                .title(" Add New User ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green));
            let inner = block.inner(area);
            frame.render_widget(block, area);

            let text = vec![
                Line::from(format!("> {input}")),
                Line::from(""),
                Line::from(Span::styled(
                    "Enter:add  Esc:cancel",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            frame.render_widget(Paragraph::new(text), inner);

            if let Some(cursor) = input_cursor(inner, input) {
                frame.set_cursor_position(cursor);
            }
        }
    }
}

/// Cursor position after the "> " prefix, or `None` once the text runs past
/// the right edge.
fn input_cursor(inner: Rect, input: &str) -> Option<Position> {
    let typed = u16::try_from(input.chars().count()).unwrap_or(u16::MAX);
    let x = inner.x.saturating_add(2).saturating_add(typed);
    (x < inner.x.saturating_add(inner.width)).then(|| Position::new(x, inner.y))
}
