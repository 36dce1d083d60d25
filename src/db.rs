//! Task store and formatting helpers.
//!
//! This module provides the `Database` struct, a JSON-file backed list of
//! tasks, along with the small formatting utilities shared by the CLI and
//! the terminal user interface.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::fields::{Quadrant, TaskStatus};
use crate::task::Task;

/// Failure reading or writing the task store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read task store {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("task store {path} is not valid JSON: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
    #[error("failed to encode task store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("failed to write task store {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// In-memory copy of the task store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Database {
    pub tasks: Vec<Task>,
}

impl Database {
    /// Load the store from a JSON file. A missing file is an empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "task store missing, starting empty");
            return Ok(Database::default());
        }
        let buf = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&buf).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the store using an atomic write (temp file + rename).
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let data = serde_json::to_string_pretty(self)?;
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp = path.with_extension("json.tmp");
        let mut f = File::create(&tmp).map_err(write_err)?;
        f.write_all(data.as_bytes()).map_err(write_err)?;
        f.flush().map_err(write_err)?;
        fs::rename(&tmp, path).map_err(write_err)?;
        Ok(())
    }

    /// Generate the next available task ID.
    pub fn next_id(&self) -> u64 {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    /// Assign an id and timestamps, then append the task. Returns the new id.
    pub fn insert(&mut self, mut task: Task, now_utc: i64) -> u64 {
        let id = self.next_id();
        task.id = id;
        task.created_at_utc = now_utc;
        task.updated_at_utc = now_utc;
        self.tasks.push(task);
        id
    }

    /// Get a task by ID.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Get a mutable reference to a task by ID.
    pub fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Remove a task by ID, returning it if it existed.
    pub fn remove(&mut self, id: u64) -> Option<Task> {
        self.take(id).map(|(_, task)| task)
    }

    /// Remove a task by ID, returning its index so it can be put back with [`Database::restore`].
    pub fn take(&mut self, id: u64) -> Option<(usize, Task)> {
        let idx = self.tasks.iter().position(|t| t.id == id)?;
        Some((idx, self.tasks.remove(idx)))
    }

    /// Put a task back where [`Database::take`] found it.
    pub fn restore(&mut self, idx: usize, task: Task) {
        let idx = idx.min(self.tasks.len());
        self.tasks.insert(idx, task);
    }

    /// Open tasks (not Done) in one quadrant, in insertion order.
    pub fn open_in_quadrant(&self, quadrant: Quadrant) -> impl Iterator<Item = &Task> {
        self.tasks
            .iter()
            .filter(move |t| t.status != TaskStatus::Done && t.quadrant() == quadrant)
    }
}

/// Format a due date string relative to today ("today", "tomorrow", "in 3d", "2d late").
///
/// Strings that are not `dd/mm/yyyy` dates are shown as-is.
pub fn format_due_relative(task: &Task, today: NaiveDate) -> String {
    match task.due_date() {
        None if task.due.is_empty() => "-".into(),
        None => task.due.clone(),
        Some(d) => {
            let days = (d - today).num_days();
            if days == 0 {
                "today".into()
            } else if days == 1 {
                "tomorrow".into()
            } else if days > 1 {
                format!("in {}d", days)
            } else {
                format!("{}d late", -days)
            }
        }
    }
}

/// Render a slider step as a row of dots, e.g. `●●●○○`.
pub fn format_steps(value: u8, step_count: u8) -> String {
    (0..step_count)
        .map(|i| if i <= value { '●' } else { '○' })
        .collect()
}

/// Print tasks in a formatted table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<5} {:<3} {:<12} {:<10} {:<12} {:<14} {}",
        "ID", "", "Status", "Quadrant", "Due", "Category", "Title"
    );
    let today = Local::now().date_naive();
    for t in tasks {
        println!(
            "{:<5} {:<3} {:<12} {:<10} {:<12} {:<14} {}",
            t.id,
            t.emoji,
            t.status.label(),
            t.quadrant().label(),
            format_due_relative(t, today),
            truncate(&t.category, 14),
            t.title
        );
    }
}

/// Truncate a string to a maximum width, adding ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}
