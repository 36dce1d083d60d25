//! Task data structure and submission rules.
//!
//! A `Task` is plain data. The only behaviour here is the validation shared by
//! the add-task form and the `add` command, plus a few derived views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::fields::{Quadrant, TaskStatus};

/// Emoji used when the user never picked one.
pub const DEFAULT_EMOJI: &str = "🚀";

/// Due date given to tasks created through the form.
pub const DUE_PLACEHOLDER: &str = "18/12/2021";

/// Format of the `due` string.
pub const DUE_FORMAT: &str = "%d/%m/%Y";

/// A single to-do item placed on the Eisenhower matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Assigned by the store on insert; `0` until then.
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub description: String,
    pub category: String,
    pub emoji: String,
    pub urgency: u8,
    pub importance: u8,
    pub due: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at_utc: i64,
    #[serde(default)]
    pub updated_at_utc: i64,
}

impl Task {
    pub fn quadrant(&self) -> Quadrant {
        Quadrant::classify(self.urgency, self.importance)
    }

    /// Parsed due date, if the string is a valid `dd/mm/yyyy` date.
    pub fn due_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.due, DUE_FORMAT).ok()
    }
}

/// A required text field was empty at submission time.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Title is Empty!")]
    EmptyTitle,
    #[error("Description is Empty!")]
    EmptyDescription,
    #[error("Category is Empty!")]
    EmptyCategory,
}

/// Check the required text fields in order: title, description, category.
///
/// Emptiness is exact. A string of spaces is accepted.
pub fn validate_fields(title: &str, description: &str, category: &str) -> Result<(), ValidationError> {
    if title.is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    if description.is_empty() {
        return Err(ValidationError::EmptyDescription);
    }
    if category.is_empty() {
        return Err(ValidationError::EmptyCategory);
    }
    Ok(())
}
