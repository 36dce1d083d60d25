//! Enumerations and rating scales for tasks.
//!
//! This module defines the task lifecycle status, the discrete step scale used
//! for urgency and importance, and the Eisenhower quadrant derived from them.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of discrete positions on the urgency and importance sliders.
pub const STEP_COUNT: u8 = 5;

/// Lowest step that counts as "urgent" or "important" when classifying.
pub const HIGH_STEP: u8 = 2;

/// Task lifecycle status.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    #[serde(alias = "TODO")]
    Todo,
    #[serde(alias = "IN_PROGRESS")]
    InProgress,
    #[serde(alias = "DONE")]
    Done,
}

impl TaskStatus {
    /// Next status in the Todo → In Progress → Done → Todo cycle.
    pub fn next(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }
}

/// Eisenhower matrix quadrant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    /// Urgent and important.
    DoFirst,
    /// Important, not urgent.
    Schedule,
    /// Urgent, not important.
    Delegate,
    /// Neither urgent nor important.
    Eliminate,
}

impl Quadrant {
    /// Matrix order: top-left, top-right, bottom-left, bottom-right.
    pub const ALL: [Quadrant; 4] = [
        Quadrant::DoFirst,
        Quadrant::Schedule,
        Quadrant::Delegate,
        Quadrant::Eliminate,
    ];

    /// Classify a pair of slider steps.
    pub fn classify(urgency: u8, importance: u8) -> Self {
        match (urgency >= HIGH_STEP, importance >= HIGH_STEP) {
            (true, true) => Quadrant::DoFirst,
            (false, true) => Quadrant::Schedule,
            (true, false) => Quadrant::Delegate,
            (false, false) => Quadrant::Eliminate,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Quadrant::DoFirst => "Do First",
            Quadrant::Schedule => "Schedule",
            Quadrant::Delegate => "Delegate",
            Quadrant::Eliminate => "Eliminate",
        }
    }
}
