//! Command implementations for the CLI interface.
//!
//! This module contains the handlers behind each subcommand: launching the
//! TUI at a route, and the scriptable add/list/view/status/delete commands
//! that go through the same view-model as the screens.

use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{Local, NaiveDate, TimeZone, Utc};
use clap::Subcommand;
use clap_complete::{generate, Shell};
use tracing::info;

use crate::{
    config::Config,
    db::{format_due_relative, format_steps, print_table, Database},
    emoji::EmojiSource,
    fields::{Quadrant, TaskStatus, STEP_COUNT},
    task::{validate_fields, Task, DEFAULT_EMOJI, DUE_FORMAT, DUE_PLACEHOLDER},
    tui::{
        app::App,
        nav::{NavArgs, RouteName, Router},
        run::run_tui,
    },
    view_model::MainViewModel,
};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI interface.
    Ui {
        /// Screen to open on top of home.
        #[arg(long, value_enum, default_value_t = RouteName::Home)]
        route: RouteName,
        /// Task id, required for the task-details route.
        #[arg(long)]
        id: Option<u64>,
    },

    /// Add a new task.
    Add {
        /// Short title for the task.
        title: String,
        /// Longer description.
        #[arg(long)]
        desc: String,
        /// Category label.
        #[arg(long)]
        category: String,
        /// Emoji shown next to the task. Defaults to 🚀.
        #[arg(long)]
        emoji: Option<String>,
        /// Urgency step, 0 to 4.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=4))]
        urgency: u8,
        /// Importance step, 0 to 4.
        #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=4))]
        importance: u8,
        /// Due date as dd/mm/yyyy.
        #[arg(long)]
        due: Option<String>,
    },

    /// List tasks with optional filters.
    List {
        /// Filter by status.
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        /// Filter by Eisenhower quadrant.
        #[arg(long, value_enum)]
        quadrant: Option<Quadrant>,
        /// Include completed tasks.
        #[arg(long)]
        all: bool,
    },

    /// View a single task.
    View {
        id: u64,
    },

    /// Set a task's status.
    Status {
        id: u64,
        #[arg(value_enum)]
        status: TaskStatus,
    },

    /// Delete a task.
    Delete {
        id: u64,
    },

    /// Print the emoji catalogue.
    Emoji,

    /// Generate shell completion scripts.
    Completions {
        /// Shell type.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Open the TUI, first navigating to `route` when it is not home.
///
/// A route that needs an argument it was not given is an error, raised before
/// the terminal is touched.
pub fn cmd_ui(
    db_path: &Path,
    config: Config,
    config_path: &Path,
    route: RouteName,
    id: Option<u64>,
) -> anyhow::Result<()> {
    let router = initial_router(route, id)?;
    let view_model = MainViewModel::new(db_path, config.emoji_source())
        .with_context(|| format!("failed to open task store {}", db_path.display()))?;
    let app = App::new(router, view_model, config, config_path);
    run_tui(app).context("UI error")
}

fn initial_router(route: RouteName, id: Option<u64>) -> anyhow::Result<Router> {
    let mut router = Router::new();
    if route != RouteName::Home {
        router.navigate(route, &NavArgs { id })?;
    }
    Ok(router)
}

/// Parse a `dd/mm/yyyy` due date, keeping the original text.
fn parse_due(raw: &str) -> anyhow::Result<String> {
    NaiveDate::parse_from_str(raw, DUE_FORMAT)
        .with_context(|| format!("invalid due date '{}', expected dd/mm/yyyy", raw))?;
    Ok(raw.to_string())
}

/// Add a new task. Validation matches the add-task form.
#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    db_path: &Path,
    emoji_source: Arc<dyn EmojiSource>,
    title: String,
    desc: String,
    category: String,
    emoji: Option<String>,
    urgency: u8,
    importance: u8,
    due: Option<String>,
) -> anyhow::Result<u64> {
    validate_fields(&title, &desc, &category)?;
    let due = match due {
        Some(raw) => parse_due(&raw)?,
        None => DUE_PLACEHOLDER.to_string(),
    };
    let task = Task {
        id: 0,
        title,
        description: desc,
        category,
        emoji: emoji
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_EMOJI.to_string()),
        urgency: urgency.min(STEP_COUNT - 1),
        importance: importance.min(STEP_COUNT - 1),
        due,
        status: TaskStatus::Todo,
        created_at_utc: 0,
        updated_at_utc: 0,
    };

    let mut vm = MainViewModel::new(db_path, emoji_source)?;
    let id = vm.insert_task(task).context("Failed to save DB")?;
    println!("Added task {}", id);
    Ok(id)
}

/// Tasks matching the list filters, ordered by quadrant then id.
///
/// Done tasks are hidden unless `all` is set or `status` asks for them.
pub fn filter_tasks(
    db: &Database,
    status: Option<TaskStatus>,
    quadrant: Option<Quadrant>,
    all: bool,
) -> Vec<&Task> {
    let show_done = all || status == Some(TaskStatus::Done);
    let mut tasks: Vec<&Task> = db
        .tasks
        .iter()
        .filter(|t| show_done || t.status != TaskStatus::Done)
        .filter(|t| status.map_or(true, |s| t.status == s))
        .filter(|t| quadrant.map_or(true, |q| t.quadrant() == q))
        .collect();
    tasks.sort_by_key(|t| (t.quadrant() as u8, t.id));
    tasks
}

/// List tasks with optional filtering.
pub fn cmd_list(
    db_path: &Path,
    status: Option<TaskStatus>,
    quadrant: Option<Quadrant>,
    all: bool,
) -> anyhow::Result<()> {
    let db = Database::load(db_path)?;
    let tasks = filter_tasks(&db, status, quadrant, all);
    if tasks.is_empty() {
        println!("No tasks.");
        return Ok(());
    }
    print_table(&tasks);
    Ok(())
}

/// Print every field of one task.
pub fn cmd_view(db_path: &Path, id: u64) -> anyhow::Result<()> {
    let db = Database::load(db_path)?;
    let Some(task) = db.get(id) else {
        bail!("Task {} not found.", id);
    };
    let today = Local::now().date_naive();
    let timestamp = |secs: i64| {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(|d| d.to_rfc3339())
            .unwrap_or_else(|| "-".into())
    };
    println!("ID:           {}", task.id);
    println!("Title:        {} {}", task.emoji, task.title);
    println!("Category:     {}", task.category);
    println!("Status:       {}", task.status.label());
    println!("Quadrant:     {}", task.quadrant().label());
    println!("Urgency:      {}", format_steps(task.urgency, STEP_COUNT));
    println!("Importance:   {}", format_steps(task.importance, STEP_COUNT));
    println!("Due:          {} ({})", task.due, format_due_relative(task, today));
    println!("Created UTC:  {}", timestamp(task.created_at_utc));
    println!("Updated UTC:  {}", timestamp(task.updated_at_utc));
    println!("Description:\n{}\n", task.description);
    Ok(())
}

pub fn cmd_status(
    db_path: &Path,
    emoji_source: Arc<dyn EmojiSource>,
    id: u64,
    status: TaskStatus,
) -> anyhow::Result<()> {
    let mut vm = MainViewModel::new(db_path, emoji_source)?;
    if !vm.set_task_status(id, status).context("Failed to save DB")? {
        bail!("Task {} not found.", id);
    }
    info!(id, status = status.label(), "status set from cli");
    println!("Task {} is now {}", id, status.label());
    Ok(())
}

pub fn cmd_delete(
    db_path: &Path,
    emoji_source: Arc<dyn EmojiSource>,
    id: u64,
) -> anyhow::Result<()> {
    let mut vm = MainViewModel::new(db_path, emoji_source)?;
    if !vm.delete_task(id).context("Failed to save DB")? {
        bail!("Task {} not found.", id);
    }
    println!("Deleted.");
    Ok(())
}

/// Print the emoji catalogue the UI picker would show.
pub fn cmd_emoji(source: &dyn EmojiSource) -> anyhow::Result<()> {
    let items = source
        .load()
        .with_context(|| format!("failed to load emoji from {}", source.describe()))?;
    for item in &items {
        println!("{}  {}", item.emoji, item.name);
    }
    Ok(())
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
