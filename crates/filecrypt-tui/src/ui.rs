use ratatui::layout::{Alignment, Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{App, MessageLevel, Screen};

mod widgets;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(0),    // menu + browser
            Constraint::Length(1), // message line
            Constraint::Length(1), // footer hints
        ])
        .split(f.area());

    draw_header(f, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)])
        .split(chunks[1]);

    widgets::menu::draw(f, app, body[0]);
    widgets::browser::draw(f, app, body[1]);

    draw_message(f, app, chunks[2]);
    draw_footer(f, app, chunks[3]);

    match &app.screen {
        Screen::Confirm { op, node, label } => {
            let name = &app.tree.node(*node).name;
            let prompt = format!("{} file \"{}\" ({})?", op.verb(), name, label);
            widgets::dialog::draw_confirm(f, &prompt);
        }
        Screen::Password { op, .. } => {
            let prompt = format!(
                "Enter the password to {} the file:",
                op.verb().to_lowercase()
            );
            widgets::dialog::draw_password(f, &prompt, app.password_input.chars().count());
        }
        _ => {}
    }
}

fn draw_header(f: &mut Frame, area: ratatui::layout::Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        "filecrypt",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, area);
}

fn draw_message(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let Some((level, text)) = &app.message else {
        return;
    };
    let style = match level {
        MessageLevel::Info => Style::default().fg(Color::Yellow),
        MessageLevel::Success => Style::default().fg(Color::Green),
        MessageLevel::Warning => Style::default().fg(Color::Yellow),
        MessageLevel::Error => Style::default().fg(Color::Red),
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {text}"), style))),
        area,
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let hints: Vec<Span> = match &app.screen {
        Screen::Menu => vec![
            Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Select  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Exit  "),
        ],
        Screen::Browser { .. } => vec![
            Span::styled("[↑↓]", Style::default().fg(Color::Yellow)),
            Span::raw(" Navigate  "),
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" Choose file  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Back  "),
        ],
        Screen::Confirm { .. } => vec![
            Span::styled("[y]", Style::default().fg(Color::Yellow)),
            Span::raw(" Confirm  "),
            Span::styled("[n]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel  "),
        ],
        Screen::Password { .. } => vec![
            Span::styled("[Enter]", Style::default().fg(Color::Yellow)),
            Span::raw(" OK  "),
            Span::styled("[Esc]", Style::default().fg(Color::Yellow)),
            Span::raw(" Cancel  "),
        ],
    };
    f.render_widget(Paragraph::new(Line::from(hints)), area);
}
