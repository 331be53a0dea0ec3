use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Persisted TUI state (written to .state.json in the store directory).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Which view is showing ("queue" or "draft").
    pub view: String,
    #[serde(default)]
    pub cursor: usize,
    #[serde(default)]
    pub scroll_offset: usize,
    /// Item ids whose notes are expanded.
    #[serde(default)]
    pub expanded: HashSet<u64>,
    #[serde(default)]
    pub show_done: bool,
    /// Last committed search pattern.
    #[serde(default)]
    pub last_search: Option<String>,
}

/// Read .state.json. Missing or malformed state is simply absent.
pub fn read_ui_state(store_dir: &Path) -> Option<UiState> {
    let path = store_dir.join(".state.json");
    let content = fs::read_to_string(&path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write .state.json.
pub fn write_ui_state(store_dir: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let path = store_dir.join(".state.json");
    let content = serde_json::to_string_pretty(state)?;
    fs::write(&path, content)
}
