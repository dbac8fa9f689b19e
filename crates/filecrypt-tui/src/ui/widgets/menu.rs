use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, MenuItem, Screen};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" MENU ").borders(Borders::ALL);

    let focused = matches!(app.screen, Screen::Menu);
    let lines: Vec<Line> = MenuItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let style = if focused && i == app.menu_cursor {
                Style::default().fg(Color::White).bg(Color::Blue)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {}. {} ", i + 1, item.title()), style))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
