//! Emoji catalogue loading.
//!
//! The add-task picker shows a grid of emoji read from a catalogue. The
//! catalogue is a JSON array of `{ "emoji": "🚀", "name": "rocket" }` objects,
//! either bundled into the binary or read from a file named in the config.

use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const BUNDLED_CATALOGUE: &str = include_str!("../assets/emoji.json");

/// One selectable emoji.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiItem {
    pub emoji: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Error)]
pub enum EmojiError {
    #[error("cannot read emoji catalogue {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid emoji catalogue: {0}")]
    Parse(#[from] serde_json::Error),
}

/// State of the asynchronous emoji load as seen by the picker sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EmojiViewState {
    #[default]
    Empty,
    Loading,
    Success(Vec<EmojiItem>),
    Error(String),
}

/// Somewhere the emoji catalogue can be loaded from.
///
/// Loads run on a worker thread, hence the `Send + Sync` bound.
pub trait EmojiSource: Send + Sync {
    fn load(&self) -> Result<Vec<EmojiItem>, EmojiError>;

    /// Short description for the settings screen.
    fn describe(&self) -> String;
}

/// The catalogue compiled into the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct BundledEmoji;

impl EmojiSource for BundledEmoji {
    fn load(&self) -> Result<Vec<EmojiItem>, EmojiError> {
        parse_catalogue(BUNDLED_CATALOGUE)
    }

    fn describe(&self) -> String {
        "bundled".to_string()
    }
}

/// A catalogue read from disk on every load.
#[derive(Debug, Clone)]
pub struct FileEmoji {
    pub path: PathBuf,
}

impl EmojiSource for FileEmoji {
    fn load(&self) -> Result<Vec<EmojiItem>, EmojiError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| EmojiError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_catalogue(&raw)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parse a catalogue, dropping entries with a blank glyph.
pub fn parse_catalogue(json: &str) -> Result<Vec<EmojiItem>, EmojiError> {
    let mut items: Vec<EmojiItem> = serde_json::from_str(json)?;
    items.retain(|item| !item.emoji.trim().is_empty());
    Ok(items)
}
