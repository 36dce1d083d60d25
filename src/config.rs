//! User configuration stored as TOML.
//!
//! Every field has a default, so a missing file or a partial file both load.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::emoji::{BundledEmoji, EmojiSource, FileEmoji};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("invalid config {path}: {source}")]
    Parse { path: PathBuf, source: toml::de::Error },
    #[error("failed to encode config: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("failed to write config {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".einsen")
}

/// Default location of the config file, `~/.einsen/config.toml`.
pub fn default_config_path() -> PathBuf {
    default_data_dir().join("config.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the task store and the log file.
    pub data_dir: PathBuf,
    /// Emoji catalogue to use instead of the bundled one.
    pub emoji_file: Option<PathBuf>,
    pub dark_theme: bool,
    /// Event poll timeout for the UI loop, in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            emoji_file: None,
            dark_theme: true,
            tick_rate_ms: 50,
        }
    }
}

impl Config {
    /// Load the config, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self)?;
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(path, raw).map_err(write_err)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join("tasks.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("einsen.log")
    }

    /// The emoji catalogue this config points at.
    pub fn emoji_source(&self) -> Arc<dyn EmojiSource> {
        match &self.emoji_file {
            Some(path) => Arc::new(FileEmoji { path: path.clone() }),
            None => Arc::new(BundledEmoji),
        }
    }
}
