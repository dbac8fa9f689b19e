use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

/// Fixed-height box centered in the frame, wide enough for the prompt.
fn centered_rect(f: &Frame, prompt_width: u16, height: u16) -> Rect {
    let area = f.area();
    let width = u16::min(u16::max(prompt_width + 6, 40), area.width.saturating_sub(4));

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}

pub fn draw_confirm(f: &mut Frame, prompt: &str) {
    let area = centered_rect(f, prompt.chars().count() as u16, 5);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::raw(prompt)),
        Line::from(""),
        Line::from(vec![
            Span::styled("[Y]es", Style::default().fg(Color::Green)),
            Span::raw("   "),
            Span::styled("[N]o", Style::default().fg(Color::Red)),
        ]),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Confirm ").borders(Borders::ALL));
    f.render_widget(dialog, area);
}

pub fn draw_password(f: &mut Frame, prompt: &str, typed_chars: usize) {
    let area = centered_rect(f, prompt.chars().count() as u16, 5);
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(Span::raw(prompt)),
        Line::from(""),
        Line::from(Span::styled(
            "*".repeat(typed_chars),
            Style::default().fg(Color::Cyan),
        )),
    ];
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().title(" Password ").borders(Borders::ALL));
    f.render_widget(dialog, area);
}
