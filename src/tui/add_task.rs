//! Add-task screen: the form, the emoji picker sheet and submission.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use tracing::debug;

use crate::{
    db::format_steps,
    emoji::EmojiViewState,
    fields::Quadrant,
    task::ValidationError,
    tui::{
        actions::MainActions,
        colors::{quadrant_color, Palette},
        emoji_sheet::GridMove,
        input::InputField,
        task_form::{
            AddTaskForm, CATEGORY_GLOBAL_ORDER, DESCRIPTION_GLOBAL_ORDER, EMOJI_GLOBAL_ORDER,
            IMPORTANCE_GLOBAL_ORDER, SAVE_GLOBAL_ORDER, StepSlider, TITLE_GLOBAL_ORDER,
            URGENCY_GLOBAL_ORDER,
        },
        utils::bottom_sheet,
    },
    view_model::MainViewModel,
};

/// Width of one emoji tile in terminal cells.
const TILE_WIDTH: u16 = 6;

pub const SAVED_MESSAGE: &str = "Task Added Successfully!";

/// Result of pressing save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Invalid(ValidationError),
    Saved(u64),
    Failed(String),
}

impl SubmitOutcome {
    /// Text for the status bar.
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Invalid(e) => e.to_string(),
            SubmitOutcome::Saved(_) => SAVED_MESSAGE.to_string(),
            SubmitOutcome::Failed(e) => format!("Error: {}", e),
        }
    }
}

#[derive(Debug, Default)]
pub struct AddTaskScreen {
    pub form: AddTaskForm,
}

impl AddTaskScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key press. Returns a status bar message, if any.
    pub fn handle_key(
        &mut self,
        key: KeyEvent,
        vm: &mut MainViewModel,
        actions: &MainActions,
    ) -> Option<String> {
        if self.form.picker.is_visible() {
            self.handle_sheet_key(key, vm);
            return None;
        }

        match key.code {
            KeyCode::Esc => actions.up_press(),
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            KeyCode::Left => self.form.handle_left_right(false),
            KeyCode::Right => self.form.handle_left_right(true),
            KeyCode::Backspace => self.form.handle_backspace(),
            KeyCode::Delete => self.form.handle_delete(),
            KeyCode::Home => self.form.move_home(),
            KeyCode::End => self.form.move_end(),
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Some(self.submit(vm, actions).message());
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.form.current_field == EMOJI_GLOBAL_ORDER => {
                self.open_picker(vm);
            }
            KeyCode::Enter => return Some(self.submit(vm, actions).message()),
            KeyCode::Char(c) => self.form.handle_char(c),
            _ => {}
        }
        None
    }

    /// Open the sheet and request the catalogue once per opening.
    pub fn open_picker(&mut self, vm: &mut MainViewModel) {
        if self.form.open_picker() {
            vm.get_all_emoji();
        }
    }

    fn handle_sheet_key(&mut self, key: KeyEvent, vm: &MainViewModel) {
        let items = match vm.emoji() {
            EmojiViewState::Success(items) => items.as_slice(),
            _ => &[],
        };
        match key.code {
            KeyCode::Esc => self.form.picker.close(),
            KeyCode::Left => self.form.picker.move_cursor(GridMove::Left, items.len()),
            KeyCode::Right => self.form.picker.move_cursor(GridMove::Right, items.len()),
            KeyCode::Up => self.form.picker.move_cursor(GridMove::Up, items.len()),
            KeyCode::Down => self.form.picker.move_cursor(GridMove::Down, items.len()),
            KeyCode::Enter => {
                if let Some(item) = items.get(self.form.picker.cursor()) {
                    debug!(emoji = %item.emoji, "emoji selected");
                    self.form.select_emoji(&item.emoji);
                }
            }
            _ => {}
        }
    }

    /// Validate, insert and pop back on success. The form is kept on failure.
    pub fn submit(&mut self, vm: &mut MainViewModel, actions: &MainActions) -> SubmitOutcome {
        let task = match self.form.submit() {
            Ok(task) => task,
            Err(e) => {
                debug!(error = %e, "add task rejected");
                return SubmitOutcome::Invalid(e);
            }
        };
        match vm.insert_task(task) {
            Ok(id) => {
                actions.up_press();
                SubmitOutcome::Saved(id)
            }
            Err(e) => SubmitOutcome::Failed(e.to_string()),
        }
    }

    /// Render the form, then the picker sheet over it when open.
    pub fn render(&mut self, f: &mut Frame, area: Rect, vm: &MainViewModel, palette: &Palette) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Emoji
                Constraint::Length(3), // Title
                Constraint::Length(3), // Description
                Constraint::Length(3), // Category
                Constraint::Length(3), // Urgency
                Constraint::Length(3), // Importance
                Constraint::Length(3), // Save
                Constraint::Min(0),    // Instructions
            ])
            .split(area);

        let focus = |field: usize| {
            if self.form.current_field == field {
                Style::default().fg(palette.accent)
            } else {
                Style::default().fg(palette.fg)
            }
        };

        let emoji = if self.form.selected_emoji.is_empty() {
            format!("{}  (default, Enter to pick)", self.form.emoji())
        } else {
            self.form.selected_emoji.clone()
        };
        let emoji_box = Paragraph::new(emoji).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Emoji")
                .border_style(focus(EMOJI_GLOBAL_ORDER)),
        );
        f.render_widget(emoji_box, chunks[0]);

        let text_fields: [(&InputField, &str, usize, Rect); 3] = [
            (&self.form.title, "Title *", TITLE_GLOBAL_ORDER, chunks[1]),
            (&self.form.description, "Description *", DESCRIPTION_GLOBAL_ORDER, chunks[2]),
            (&self.form.category, "Category *", CATEGORY_GLOBAL_ORDER, chunks[3]),
        ];
        for (field, title, order, chunk) in text_fields {
            let input = Paragraph::new(field.value.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(focus(order)),
            );
            f.render_widget(input, chunk);
            if field.active && !self.form.picker.is_visible() {
                let column = Span::raw(field.before_cursor()).width() as u16;
                f.set_cursor_position((chunk.x + 1 + column, chunk.y + 1));
            }
        }

        let sliders: [(&StepSlider, &str, usize, Rect); 2] = [
            (&self.form.urgency, "Urgency", URGENCY_GLOBAL_ORDER, chunks[4]),
            (&self.form.importance, "Importance", IMPORTANCE_GLOBAL_ORDER, chunks[5]),
        ];
        for (slider, title, order, chunk) in sliders {
            let text = format!(
                "◀ {} ▶  {}/{}",
                format_steps(slider.value(), slider.step_count()),
                slider.value(),
                slider.step_count() - 1
            );
            let widget = Paragraph::new(text).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(focus(order)),
            );
            f.render_widget(widget, chunk);
        }

        let quadrant = Quadrant::classify(self.form.urgency.value(), self.form.importance.value());
        let save_style = if self.form.current_field == SAVE_GLOBAL_ORDER {
            Style::default()
                .fg(palette.status_fg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.fg)
        };
        let save = Paragraph::new(Line::from(vec![
            Span::styled("[ Save Task ]", save_style),
            Span::raw("  → "),
            Span::styled(quadrant.label(), Style::default().fg(quadrant_color(quadrant))),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(focus(SAVE_GLOBAL_ORDER)));
        f.render_widget(save, chunks[6]);

        let help = Paragraph::new(
            "Tab/↑↓ move between fields  ←→ adjust sliders  Enter save (or pick emoji)  Ctrl+S save  Esc back",
        )
        .style(Style::default().fg(palette.muted))
        .wrap(Wrap { trim: true });
        f.render_widget(help, chunks[7]);

        if self.form.picker.is_visible() {
            self.render_sheet(f, area, vm, palette);
        }
    }

    /// Draw the picker sheet for the current emoji state.
    ///
    /// Drawing never requests a load; that happens when the sheet opens.
    fn render_sheet(&mut self, f: &mut Frame, area: Rect, vm: &MainViewModel, palette: &Palette) {
        let sheet = bottom_sheet(60, area);
        f.render_widget(Clear, sheet);
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Pick an emoji  (arrows move, Enter select, Esc close)")
            .style(Style::default().fg(palette.fg).bg(palette.bg));
        let inner = block.inner(sheet);
        f.render_widget(block, sheet);

        let items = match vm.emoji() {
            EmojiViewState::Empty => return render_message(f, inner, "Empty".to_string()),
            EmojiViewState::Loading => return render_message(f, inner, "Loading".to_string()),
            EmojiViewState::Error(cause) => return render_message(f, inner, format!("Error {}", cause)),
            EmojiViewState::Success(items) => items,
        };

        let columns = (inner.width / TILE_WIDTH).max(1) as usize;
        self.form.picker.set_columns(columns);
        let cursor = self.form.picker.cursor().min(items.len().saturating_sub(1));

        // One line reserved for the hovered name.
        let visible_rows = inner.height.saturating_sub(1).max(1) as usize;
        let cursor_row = cursor / columns;
        let first_row = cursor_row.saturating_sub(visible_rows - 1);

        let lines: Vec<Line> = items
            .chunks(columns)
            .enumerate()
            .skip(first_row)
            .take(visible_rows)
            .map(|(row, tiles)| {
                let spans: Vec<Span> = tiles
                    .iter()
                    .enumerate()
                    .map(|(col, item)| {
                        let text = format!("  {}  ", item.emoji);
                        if row * columns + col == cursor {
                            Span::styled(text, Style::default().add_modifier(Modifier::REVERSED))
                        } else {
                            Span::raw(text)
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let grid_area = Rect { height: inner.height.saturating_sub(1), ..inner };
        f.render_widget(Paragraph::new(lines), grid_area);

        if let Some(item) = items.get(cursor) {
            let name_area = Rect {
                y: inner.y + inner.height.saturating_sub(1),
                height: 1u16.min(inner.height),
                ..inner
            };
            let name = Paragraph::new(format!("{} {}", item.emoji, item.name))
                .style(Style::default().fg(palette.muted));
            f.render_widget(name, name_area);
        }
    }
}

fn render_message(f: &mut Frame, area: Rect, text: String) {
    let message = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(message, area);
}
