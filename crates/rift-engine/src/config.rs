//! Configuration for a play session.

use std::path::PathBuf;

/// Default save file name.
pub const DEFAULT_SAVE_PATH: &str = "rift-save.json";

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Where SAVE writes and LOAD reads.
    pub save_path: PathBuf,
    /// Inventory limit. `None` uses the manifest's value.
    pub max_inventory: Option<usize>,
    /// Append the score to every turn that changed it.
    pub echo_score: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            max_inventory: None,
            echo_score: false,
        }
    }
}

impl SessionConfig {
    /// Set the save file path.
    pub fn with_save_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_path = path.into();
        self
    }

    /// Override the manifest's inventory limit.
    pub fn with_max_inventory(mut self, limit: usize) -> Self {
        self.max_inventory = Some(limit);
        self
    }

    /// Echo score changes after each turn.
    pub fn with_echo_score(mut self, echo: bool) -> Self {
        self.echo_score = echo;
        self
    }
}
