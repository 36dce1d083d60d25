//! Task details screen.
//!
//! Shows the task loaded by `find_task_by_id` when the route was entered.

use chrono::{Local, TimeZone};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    db::{format_due_relative, format_steps},
    fields::STEP_COUNT,
    tui::{
        actions::MainActions,
        colors::{quadrant_color, Palette, CRIMSON},
        utils::centered_rect,
    },
    view_model::MainViewModel,
};

#[derive(Debug, Default)]
pub struct TaskDetailScreen {
    confirm_delete: bool,
}

impl TaskDetailScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_confirming(&self) -> bool {
        self.confirm_delete
    }

    pub fn handle_key(&mut self, key: KeyEvent, vm: &mut MainViewModel, actions: &MainActions) -> Option<String> {
        if self.confirm_delete {
            self.confirm_delete = false;
            if key.code != KeyCode::Char('y') {
                return Some("Delete cancelled".to_string());
            }
            let id = vm.task_details()?.id;
            return Some(match vm.delete_task(id) {
                Ok(_) => {
                    actions.up_press();
                    "Task deleted".to_string()
                }
                Err(e) => format!("Error: {}", e),
            });
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => actions.up_press(),
            KeyCode::Char('s') => {
                let id = vm.task_details()?.id;
                return Some(match vm.cycle_task_status(id) {
                    Ok(Some(status)) => format!("Status: {}", status.label()),
                    Ok(None) => "Task no longer exists".to_string(),
                    Err(e) => format!("Error: {}", e),
                });
            }
            KeyCode::Char('d') if vm.task_details().is_some() => self.confirm_delete = true,
            _ => {}
        }
        None
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, vm: &MainViewModel, palette: &Palette) {
        let Some(task) = vm.task_details() else {
            let missing = Paragraph::new("Task not found. Press Esc to go back.")
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title("Task Details"));
            f.render_widget(missing, area);
            return;
        };

        let quadrant = task.quadrant();
        let label = |s: &'static str| Span::styled(s, Style::default().add_modifier(Modifier::BOLD));
        let created = Local
            .timestamp_opt(task.created_at_utc, 0)
            .single()
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        let lines = vec![
            Line::from(vec![
                Span::raw(format!("{}  ", task.emoji)),
                Span::styled(task.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]),
            Line::from(""),
            Line::from(vec![label("Category:    "), Span::raw(task.category.clone())]),
            Line::from(vec![label("Status:      "), Span::raw(task.status.label())]),
            Line::from(vec![
                label("Quadrant:    "),
                Span::styled(quadrant.label(), Style::default().fg(quadrant_color(quadrant))),
            ]),
            Line::from(vec![
                label("Urgency:     "),
                Span::raw(format_steps(task.urgency, STEP_COUNT)),
            ]),
            Line::from(vec![
                label("Importance:  "),
                Span::raw(format_steps(task.importance, STEP_COUNT)),
            ]),
            Line::from(vec![
                label("Due:         "),
                Span::raw(format!("{} ({})", task.due, format_due_relative(task, Local::now().date_naive()))),
            ]),
            Line::from(vec![label("Created:     "), Span::raw(created)]),
            Line::from(""),
            Line::from(label("Description:")),
            Line::from(task.description.clone()),
            Line::from(""),
            Line::styled("s cycle status  d delete  Esc back", Style::default().fg(palette.muted)),
        ];

        let details = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("Task Details #{}", task.id))
                    .border_style(Style::default().fg(quadrant_color(quadrant))),
            )
            .wrap(Wrap { trim: false });
        f.render_widget(details, area);

        if self.confirm_delete {
            render_confirm(f, area, &task.title);
        }
    }
}

/// Render a confirmation dialog for deleting the task.
fn render_confirm(f: &mut Frame, area: Rect, title: &str) {
    let area = centered_rect(50, 30, area);
    f.render_widget(Clear, area);
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Delete this task?", Style::default().add_modifier(Modifier::BOLD))),
        Line::from(title.to_string()),
        Line::from(""),
        Line::from("Press 'y' to confirm, any other key to cancel"),
    ];
    let dialog = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Confirm Action")
                .borders(Borders::ALL)
                .style(Style::default().bg(CRIMSON)),
        );
    f.render_widget(dialog, area);
}
