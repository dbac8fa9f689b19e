use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, Screen};

pub fn draw(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" FILES ").borders(Borders::ALL);

    if app.flat.is_empty() {
        let msg = Paragraph::new(" No files or directory loaded").block(block);
        f.render_widget(msg, area);
        return;
    }

    let focused = matches!(app.screen, Screen::Browser { .. });
    let height = area.height.saturating_sub(2) as usize;
    // Keep the selection inside the viewport.
    let scroll = app.browser_cursor.saturating_sub(height.saturating_sub(1));

    let lines: Vec<Line> = app
        .flat
        .iter()
        .enumerate()
        .skip(scroll)
        .take(height)
        .map(|(i, &id)| {
            let node = app.tree.node(id);
            let marker = if node.is_dir { "->" } else { "  " };
            let indent = "  ".repeat(node.depth);

            let mut style = if node.is_dir {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            if focused && i == app.browser_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }

            Line::from(Span::styled(
                format!("{indent}{marker} {}", node.name),
                style,
            ))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
