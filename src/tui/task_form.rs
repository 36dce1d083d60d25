//! Add-task form state for the terminal user interface.
//!
//! This module provides the `AddTaskForm` structure: three text fields, two
//! step sliders, the emoji picker sheet and the focus order between them.
//! Submission validates the text fields in a fixed order and builds the
//! `Task` to hand to the view-model.

use crate::{
    fields::{TaskStatus, STEP_COUNT},
    task::{validate_fields, Task, ValidationError, DEFAULT_EMOJI, DUE_PLACEHOLDER},
    tui::{emoji_sheet::EmojiSheet, input::InputField},
};

/// Global order constants for the add-task view fields.
pub const EMOJI_GLOBAL_ORDER: usize = 0;
pub const TITLE_GLOBAL_ORDER: usize = 1;
pub const DESCRIPTION_GLOBAL_ORDER: usize = 2;
pub const CATEGORY_GLOBAL_ORDER: usize = 3;
pub const URGENCY_GLOBAL_ORDER: usize = 4;
pub const IMPORTANCE_GLOBAL_ORDER: usize = 5;
pub const SAVE_GLOBAL_ORDER: usize = 6;

const FIELD_COUNT: usize = 7;

/// A value restricted to `0..step_count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepSlider {
    value: u8,
    step_count: u8,
}

impl StepSlider {
    pub fn new(step_count: u8) -> Self {
        Self {
            value: 0,
            step_count: step_count.max(1),
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn step_count(&self) -> u8 {
        self.step_count
    }

    /// Set the value, clamping to the last step.
    pub fn set(&mut self, value: u8) {
        self.value = value.min(self.step_count - 1);
    }

    pub fn increment(&mut self) {
        self.set(self.value.saturating_add(1));
    }

    pub fn decrement(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// Per-visit state of the add-task screen.
#[derive(Debug, Clone)]
pub struct AddTaskForm {
    pub title: InputField,
    pub description: InputField,
    pub category: InputField,
    pub urgency: StepSlider,
    pub importance: StepSlider,
    pub selected_emoji: String,
    pub picker: EmojiSheet,
    pub current_field: usize,
}

impl Default for AddTaskForm {
    fn default() -> Self {
        Self::new()
    }
}

impl AddTaskForm {
    pub fn new() -> Self {
        let mut form = Self {
            title: InputField::new(),
            description: InputField::new(),
            category: InputField::new(),
            urgency: StepSlider::new(STEP_COUNT),
            importance: StepSlider::new(STEP_COUNT),
            selected_emoji: String::new(),
            picker: EmojiSheet::new(),
            current_field: TITLE_GLOBAL_ORDER,
        };
        form.update_active_field();
        form
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = if self.current_field == 0 {
            FIELD_COUNT - 1
        } else {
            self.current_field - 1
        };
        self.update_active_field();
    }

    /// Update which text field is currently active for editing.
    pub fn update_active_field(&mut self) {
        self.title.active = self.current_field == TITLE_GLOBAL_ORDER;
        self.description.active = self.current_field == DESCRIPTION_GLOBAL_ORDER;
        self.category.active = self.current_field == CATEGORY_GLOBAL_ORDER;
    }

    fn active_input(&mut self) -> Option<&mut InputField> {
        match self.current_field {
            TITLE_GLOBAL_ORDER => Some(&mut self.title),
            DESCRIPTION_GLOBAL_ORDER => Some(&mut self.description),
            CATEGORY_GLOBAL_ORDER => Some(&mut self.category),
            _ => None,
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        if let Some(field) = self.active_input() {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        if let Some(field) = self.active_input() {
            field.handle_delete();
        }
    }

    pub fn move_home(&mut self) {
        if let Some(field) = self.active_input() {
            field.move_home();
        }
    }

    pub fn move_end(&mut self) {
        if let Some(field) = self.active_input() {
            field.move_end();
        }
    }

    /// Handle left/right arrow keys for cursor movement or slider changes.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            URGENCY_GLOBAL_ORDER => {
                if right {
                    self.urgency.increment()
                } else {
                    self.urgency.decrement()
                }
            }
            IMPORTANCE_GLOBAL_ORDER => {
                if right {
                    self.importance.increment()
                } else {
                    self.importance.decrement()
                }
            }
            _ => {
                if let Some(field) = self.active_input() {
                    if right {
                        field.move_cursor_right()
                    } else {
                        field.move_cursor_left()
                    }
                }
            }
        }
    }

    /// Show the emoji picker. Returns `true` when the sheet was hidden, which
    /// is when the caller should request the catalogue.
    pub fn open_picker(&mut self) -> bool {
        self.picker.open()
    }

    /// Record the picked emoji and close the sheet.
    pub fn select_emoji(&mut self, value: &str) {
        self.selected_emoji = value.to_string();
        self.picker.close();
    }

    /// The emoji a submission would use.
    pub fn emoji(&self) -> &str {
        if self.selected_emoji.is_empty() {
            DEFAULT_EMOJI
        } else {
            &self.selected_emoji
        }
    }

    /// Validate the form and build the task to insert. The form is not modified.
    pub fn submit(&self) -> Result<Task, ValidationError> {
        validate_fields(&self.title.value, &self.description.value, &self.category.value)?;
        Ok(Task {
            id: 0,
            title: self.title.value.clone(),
            description: self.description.value.clone(),
            category: self.category.value.clone(),
            emoji: self.emoji().to_string(),
            urgency: self.urgency.value(),
            importance: self.importance.value(),
            due: DUE_PLACEHOLDER.to_string(),
            status: TaskStatus::Todo,
            created_at_utc: 0,
            updated_at_utc: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(title: &str, description: &str, category: &str) -> AddTaskForm {
        let mut form = AddTaskForm::new();
        form.title = InputField::with_value(title);
        form.description = InputField::with_value(description);
        form.category = InputField::with_value(category);
        form
    }

    #[test]
    fn starts_empty_on_title() {
        let form = AddTaskForm::new();
        assert_eq!(form.current_field, TITLE_GLOBAL_ORDER);
        assert!(form.title.active);
        assert_eq!(form.urgency.value(), 0);
        assert_eq!(form.importance.value(), 0);
        assert!(form.selected_emoji.is_empty());
        assert!(!form.picker.is_visible());
    }

    #[test]
    fn ship_report_scenario() {
        let mut form = filled("Ship report", "Write Q3 summary", "Work");
        form.urgency.set(3);
        form.importance.set(1);
        let task = form.submit().unwrap();
        assert_eq!(
            task,
            Task {
                id: 0,
                title: "Ship report".into(),
                description: "Write Q3 summary".into(),
                category: "Work".into(),
                emoji: "🚀".into(),
                urgency: 3,
                importance: 1,
                due: "18/12/2021".into(),
                status: TaskStatus::Todo,
                created_at_utc: 0,
                updated_at_utc: 0,
            }
        );
    }

    #[test]
    fn every_empty_combination_reports_first_empty_field() {
        let values = ["", "x"];
        for t in values {
            for d in values {
                for c in values {
                    let form = filled(t, d, c);
                    let expected = if t.is_empty() {
                        Err(ValidationError::EmptyTitle)
                    } else if d.is_empty() {
                        Err(ValidationError::EmptyDescription)
                    } else if c.is_empty() {
                        Err(ValidationError::EmptyCategory)
                    } else {
                        continue;
                    };
                    assert_eq!(form.submit().map(|_| ()), expected, "{t:?} {d:?} {c:?}");
                }
            }
        }
    }

    #[test]
    fn failed_submit_preserves_state() {
        let mut form = filled("", "desc", "cat");
        form.urgency.set(2);
        form.current_field = CATEGORY_GLOBAL_ORDER;
        let before = form.clone();
        assert_eq!(form.submit().unwrap_err().to_string(), "Title is Empty!");
        assert_eq!(form.title, before.title);
        assert_eq!(form.description, before.description);
        assert_eq!(form.urgency, before.urgency);
        assert_eq!(form.current_field, before.current_field);
    }

    #[test]
    fn every_step_pair_builds_a_todo_task() {
        for u in 0..STEP_COUNT {
            for i in 0..STEP_COUNT {
                let mut form = filled("t", "d", "c");
                form.urgency.set(u);
                form.importance.set(i);
                let task = form.submit().unwrap();
                assert_eq!((task.urgency, task.importance), (u, i));
                assert_eq!(task.status, TaskStatus::Todo);
                assert_eq!(task.due, DUE_PLACEHOLDER);
            }
        }
    }

    #[test]
    fn picked_emoji_is_submitted() {
        let mut form = filled("t", "d", "c");
        assert!(form.open_picker());
        form.select_emoji("🔥");
        assert!(!form.picker.is_visible());
        assert_eq!(form.selected_emoji, "🔥");
        assert_eq!(form.submit().unwrap().emoji, "🔥");
    }

    #[test]
    fn sliders_clamp() {
        let mut form = AddTaskForm::new();
        form.current_field = URGENCY_GLOBAL_ORDER;
        for _ in 0..10 {
            form.handle_left_right(true);
        }
        assert_eq!(form.urgency.value(), STEP_COUNT - 1);
        form.current_field = IMPORTANCE_GLOBAL_ORDER;
        form.handle_left_right(false);
        assert_eq!(form.importance.value(), 0);
        form.importance.set(200);
        assert_eq!(form.importance.value(), STEP_COUNT - 1);
    }

    #[test]
    fn focus_wraps_and_routes_typing() {
        let mut form = AddTaskForm::new();
        form.handle_char('a');
        form.next_field();
        form.handle_char('b');
        form.next_field();
        form.handle_char('c');
        form.next_field();
        // Urgency slider ignores text.
        form.handle_char('z');
        assert_eq!(
            (form.title.value.as_str(), form.description.value.as_str(), form.category.value.as_str()),
            ("a", "b", "c")
        );
        form.next_field();
        form.next_field();
        assert_eq!(form.current_field, SAVE_GLOBAL_ORDER);
        form.next_field();
        assert_eq!(form.current_field, EMOJI_GLOBAL_ORDER);
        form.prev_field();
        assert_eq!(form.current_field, SAVE_GLOBAL_ORDER);
        assert!(!form.title.active);
    }
}
