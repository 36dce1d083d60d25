//! Home screen: the Eisenhower matrix of open tasks.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::{
    fields::Quadrant,
    tui::{
        actions::MainActions,
        colors::{quadrant_color, Palette},
    },
    view_model::MainViewModel,
};

/// Handle a key on the home screen. Quitting is handled by the app.
pub fn handle_key(key: KeyEvent, actions: &MainActions) {
    match key.code {
        KeyCode::Char('a') | KeyCode::Char('n') => actions.goto_add_task(),
        KeyCode::Char('l') | KeyCode::Enter => actions.goto_all_task(),
        KeyCode::Char('s') => actions.goto_settings(),
        _ => {}
    }
}

pub fn render(f: &mut Frame, area: Rect, vm: &MainViewModel, palette: &Palette) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Matrix
            Constraint::Length(1), // Keys
        ])
        .split(area);

    let open = vm
        .tasks()
        .iter()
        .filter(|t| t.status != crate::fields::TaskStatus::Done)
        .count();
    let header = Paragraph::new(Line::from(vec![
        Span::styled("EINSEN", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            format!("{} open of {} tasks", open, vm.tasks().len()),
            Style::default().fg(palette.accent).add_modifier(Modifier::ITALIC),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    let cells: Vec<Rect> = rows
        .iter()
        .flat_map(|row| {
            Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row)
                .to_vec()
        })
        .collect();

    for (quadrant, cell) in Quadrant::ALL.iter().zip(cells) {
        render_quadrant(f, cell, vm, *quadrant, palette);
    }

    let keys = Paragraph::new("a add task  l all tasks  s settings  q quit")
        .style(Style::default().fg(palette.muted));
    f.render_widget(keys, chunks[2]);
}

fn render_quadrant(f: &mut Frame, area: Rect, vm: &MainViewModel, quadrant: Quadrant, palette: &Palette) {
    let color = quadrant_color(quadrant);
    let lines: Vec<Line> = vm
        .database()
        .open_in_quadrant(quadrant)
        .map(|t| Line::from(format!("{} {}", t.emoji, t.title)))
        .collect();
    let count = lines.len();
    let body = if lines.is_empty() {
        vec![Line::styled("Nothing here", Style::default().fg(palette.muted))]
    } else {
        lines
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!("{} ({})", quadrant.label(), count),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(body).block(block).wrap(Wrap { trim: true }), area);
}
