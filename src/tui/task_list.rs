//! All-tasks screen: a table of every task.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::{
    db::format_due_relative,
    fields::TaskStatus,
    tui::{
        actions::MainActions,
        colors::{quadrant_color, Palette},
    },
    view_model::MainViewModel,
};

#[derive(Debug, Default)]
pub struct TaskListScreen {
    state: TableState,
    show_completed: bool,
    visible: Vec<u64>,
}

impl TaskListScreen {
    pub fn new() -> Self {
        Self {
            show_completed: true,
            ..Self::default()
        }
    }

    /// Ids of the rows currently shown, in table order.
    pub fn visible(&self) -> &[u64] {
        &self.visible
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.state.selected().and_then(|i| self.visible.get(i)).copied()
    }

    /// Rebuild the visible rows from the view-model, keeping the selection when possible.
    pub fn refresh(&mut self, vm: &MainViewModel) {
        let previous = self.selected_id();
        let mut tasks: Vec<_> = vm
            .tasks()
            .iter()
            .filter(|t| self.show_completed || t.status != TaskStatus::Done)
            .collect();
        tasks.sort_by_key(|t| (t.status == TaskStatus::Done, t.quadrant() as u8, t.id));
        self.visible = tasks.iter().map(|t| t.id).collect();

        let selected = previous
            .and_then(|id| self.visible.iter().position(|&v| v == id))
            .or(if self.visible.is_empty() { None } else { Some(0) });
        self.state.select(selected);
    }

    pub fn handle_key(&mut self, key: KeyEvent, vm: &MainViewModel, actions: &MainActions) -> Option<String> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => actions.up_press(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(-1),
            KeyCode::Enter => {
                if let Some(id) = self.selected_id() {
                    actions.goto_task_details(id);
                }
            }
            KeyCode::Char('a') => actions.goto_add_task(),
            KeyCode::Char('t') => {
                self.show_completed = !self.show_completed;
                self.refresh(vm);
                return Some(if self.show_completed {
                    "Showing completed tasks".to_string()
                } else {
                    "Hiding completed tasks".to_string()
                });
            }
            _ => {}
        }
        None
    }

    fn move_selection(&mut self, delta: isize) {
        if self.visible.is_empty() {
            return;
        }
        let last = self.visible.len() - 1;
        let current = self.state.selected().unwrap_or(0);
        let next = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            (current + delta as usize).min(last)
        };
        self.state.select(Some(next));
    }

    pub fn render(&mut self, f: &mut Frame, area: Rect, vm: &MainViewModel, palette: &Palette) {
        let today = Local::now().date_naive();
        let header = Row::new(["ID", "", "Status", "Quadrant", "Due", "Category", "Title"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().fg(palette.status_fg).bg(palette.status_bg));

        let rows: Vec<Row> = self
            .visible
            .iter()
            .filter_map(|&id| vm.database().get(id))
            .map(|t| {
                let quadrant = t.quadrant();
                let style = match t.status {
                    TaskStatus::Done => Style::default().fg(palette.muted),
                    TaskStatus::InProgress => Style::default().fg(palette.fg).add_modifier(Modifier::BOLD),
                    TaskStatus::Todo => Style::default().fg(palette.fg),
                };
                Row::new(vec![
                    Cell::from(t.id.to_string()),
                    Cell::from(t.emoji.clone()),
                    Cell::from(t.status.label()),
                    Cell::from(quadrant.label()).style(Style::default().fg(quadrant_color(quadrant))),
                    Cell::from(format_due_relative(t, today)),
                    Cell::from(t.category.clone()),
                    Cell::from(t.title.clone()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(4),  // ID
            Constraint::Length(3),  // Emoji
            Constraint::Length(12), // Status
            Constraint::Length(10), // Quadrant
            Constraint::Length(12), // Due
            Constraint::Length(14), // Category
            Constraint::Min(20),    // Title
        ];

        let title = format!(
            "All Tasks ({})  Enter details  a add  t toggle done  Esc back",
            self.visible.len()
        );
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        f.render_stateful_widget(table, area, &mut self.state);
    }
}
