//! # Einsen - Eisenhower Matrix To-Do List
//!
//! A terminal to-do list that sorts tasks into the four Eisenhower quadrants
//! by urgency and importance, with a scriptable CLI alongside the TUI.
//!
//! ## Key Features
//!
//! - **Eisenhower Matrix Home**: Open tasks grouped into Do First, Schedule,
//!   Delegate and Eliminate
//! - **Add-Task Form**: Title, description, category, two step sliders and an
//!   emoji picked from a bottom sheet
//! - **Back-Stack Navigation**: Every screen is a route; Esc pops back
//! - **Local File Storage**: A single JSON file, written atomically
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI on the matrix
//! einsen
//!
//! # Open straight into a task's details
//! einsen ui --route task-details --id 3
//!
//! # Add a task via CLI
//! einsen add "Ship report" --desc "Write Q3 summary" --category Work --urgency 3 --importance 1
//!
//! # List open tasks in one quadrant
//! einsen list --quadrant do-first
//! ```
//!
//! Data lives in `~/.einsen/` by default: `tasks.json`, `config.toml` and
//! `einsen.log`. Set `RUST_LOG` or pass `-v` for more detailed logs.

use anyhow::Context;
use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod config;
pub mod db;
pub mod emoji;
pub mod fields;
pub mod task;
pub mod view_model;
pub mod tui {
    pub mod actions;
    pub mod add_task;
    pub mod app;
    pub mod colors;
    pub mod emoji_sheet;
    pub mod home;
    pub mod input;
    pub mod nav;
    pub mod run;
    pub mod settings;
    pub mod task_detail;
    pub mod task_form;
    pub mod task_list;
    pub mod utils;
}

use cli::{init_tracing, Cli};
use cmd::*;
use config::{default_config_path, Config};
use tui::nav::RouteName;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config {}", config_path.display()))?;
    init_tracing(cli.verbose, &config.log_path())?;

    let db_path = cli.db.clone().unwrap_or_else(|| config.tasks_path());
    tracing::debug!(db = %db_path.display(), config = %config_path.display(), "starting");

    let command = cli.command.unwrap_or(Commands::Ui {
        route: RouteName::Home,
        id: None,
    });

    match command {
        Commands::Ui { route, id } => cmd_ui(&db_path, config, &config_path, route, id),

        Commands::Add { title, desc, category, emoji, urgency, importance, due } => {
            cmd_add(&db_path, config.emoji_source(), title, desc, category, emoji, urgency, importance, due)
                .map(|_| ())
        }

        Commands::List { status, quadrant, all } => cmd_list(&db_path, status, quadrant, all),

        Commands::View { id } => cmd_view(&db_path, id),

        Commands::Status { id, status } => cmd_status(&db_path, config.emoji_source(), id, status),

        Commands::Delete { id } => cmd_delete(&db_path, config.emoji_source(), id),

        Commands::Emoji => cmd_emoji(config.emoji_source().as_ref()),

        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    }
}
