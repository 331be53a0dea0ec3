use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::complete::SessionConfig;

/// Configuration from config.toml in the store directory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub complete: CompleteConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// `[complete]`: inline completion knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cap on the suggestion list length.
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
    /// Minimum partial-word length before the list opens.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
}

impl Default for CompleteConfig {
    fn default() -> Self {
        CompleteConfig {
            enabled: true,
            max_suggestions: default_max_suggestions(),
            min_chars: default_min_chars(),
        }
    }
}

impl CompleteConfig {
    /// The per-surface session settings derived from this config.
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            enabled: self.enabled,
            limit: self.max_suggestions,
            min_chars: self.min_chars,
        }
    }
}

/// `[store]`: persistence knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Minimum seconds between secondary backups of board.json.
    #[serde(default = "default_backup_interval")]
    pub backup_interval_secs: u64,
    /// How many backups to keep before pruning the oldest.
    #[serde(default = "default_backup_keep")]
    pub backup_keep: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backup_interval_secs: default_backup_interval(),
            backup_keep: default_backup_keep(),
        }
    }
}

/// `[ui]`: presentation knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot name.
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

fn default_true() -> bool {
    true
}

fn default_max_suggestions() -> usize {
    6
}

fn default_min_chars() -> usize {
    3
}

fn default_backup_interval() -> u64 {
    300
}

fn default_backup_keep() -> usize {
    10
}
