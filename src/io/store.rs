use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::model::{Board, Config, StoreConfig};

/// Error type for store I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("item {0} not found")]
    NoSuchItem(u64),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

const BOARD_FILE: &str = "board.json";
const CONFIG_FILE: &str = "config.toml";
const BACKUP_DIR: &str = "backups";

/// Resolve the store directory: explicit flag, then `$JOT_DIR`, then
/// `$HOME/.jot`.
pub fn resolve_store_dir(flag: Option<&str>) -> PathBuf {
    if let Some(dir) = flag {
        return PathBuf::from(dir);
    }
    if let Some(dir) = std::env::var_os("JOT_DIR") {
        return PathBuf::from(dir);
    }
    let home = std::env::var_os("HOME").unwrap_or_else(|| ".".into());
    Path::new(&home).join(".jot")
}

/// Path of the board file inside the store directory.
pub fn board_path(dir: &Path) -> PathBuf {
    dir.join(BOARD_FILE)
}

/// Create the store directory (and its backup subdirectory) if missing.
pub fn ensure_store_dir(dir: &Path) -> Result<(), StoreError> {
    fs::create_dir_all(dir.join(BACKUP_DIR))?;
    Ok(())
}

/// Load the board. A missing file is an empty board; a malformed file is
/// an error rather than a silent reset.
pub fn load_board(dir: &Path) -> Result<Board, StoreError> {
    let path = board_path(dir);
    if !path.exists() {
        return Ok(Board::default());
    }
    let content = fs::read_to_string(&path).map_err(|e| StoreError::Read {
        path: path.clone(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| StoreError::Parse { path, source: e })
}

/// Save the board atomically: write to a temp file in the store directory,
/// then rename over the target so readers never see a half-written file.
pub fn save_board(dir: &Path, board: &Board) -> Result<(), StoreError> {
    ensure_store_dir(dir)?;
    let content = serde_json::to_string_pretty(board)?;
    let tmp = NamedTempFile::new_in(dir)?;
    fs::write(tmp.path(), content)?;
    tmp.persist(board_path(dir)).map_err(|e| e.error)?;
    Ok(())
}

/// Load config.toml, falling back to defaults when missing or malformed.
pub fn load_config(dir: &Path) -> Config {
    let path = dir.join(CONFIG_FILE);
    let Ok(content) = fs::read_to_string(&path) else {
        return Config::default();
    };
    toml::from_str(&content).unwrap_or_default()
}

/// Write a secondary backup of the board if the debounce interval has
/// elapsed since the newest existing backup, pruning the oldest beyond
/// `backup_keep`. Returns whether a backup was written. Never blocks on
/// anything but local file I/O and is called only on save, so keystroke
/// handling stays untouched.
pub fn maybe_backup(dir: &Path, config: &StoreConfig) -> Result<bool, StoreError> {
    let board = board_path(dir);
    if !board.exists() {
        return Ok(false);
    }
    let backup_dir = dir.join(BACKUP_DIR);
    fs::create_dir_all(&backup_dir)?;

    let mut existing = list_backups(&backup_dir)?;
    if let Some(newest) = existing.last() {
        let age = fs::metadata(newest)?.modified()?.elapsed().unwrap_or_default();
        if age.as_secs() < config.backup_interval_secs {
            return Ok(false);
        }
    }

    let stamp = Utc::now().format("%Y%m%dT%H%M%S%3fZ");
    let target = backup_dir.join(format!("board-{stamp}.json"));
    fs::copy(&board, &target)?;

    existing.push(target);
    while existing.len() > config.backup_keep.max(1) {
        let oldest = existing.remove(0);
        let _ = fs::remove_file(oldest);
    }
    Ok(true)
}

/// Backup files sorted oldest-first (the timestamped names sort naturally).
fn list_backups(backup_dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
    let mut backups = Vec::new();
    for entry in fs::read_dir(backup_dir)? {
        let path = entry?.path();
        if let Some(name) = path.file_name().and_then(|n| n.to_str())
            && name.starts_with("board-")
            && name.ends_with(".json")
        {
            backups.push(path);
        }
    }
    backups.sort();
    Ok(backups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_board() -> Board {
        let mut board = Board::default();
        board.add_item("first item");
        board.add_item("second item");
        board.add_note(1, "a note");
        board.draft = "scratch".into();
        board
    }

    // --- board round trip ---

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let board = sample_board();
        save_board(dir.path(), &board).unwrap();
        let loaded = load_board(dir.path()).unwrap();
        assert_eq!(loaded, board);
    }

    #[test]
    fn missing_file_is_an_empty_board() {
        let dir = TempDir::new().unwrap();
        let board = load_board(dir.path()).unwrap();
        assert!(board.items.is_empty());
        assert_eq!(board.next_id, 0);
    }

    #[test]
    fn malformed_board_is_an_error_not_a_reset() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(board_path(dir.path()), "not json {{{").unwrap();
        assert!(matches!(
            load_board(dir.path()),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn save_overwrites_previous_contents() {
        let dir = TempDir::new().unwrap();
        let mut board = sample_board();
        save_board(dir.path(), &board).unwrap();
        board.remove(1);
        save_board(dir.path(), &board).unwrap();
        let loaded = load_board(dir.path()).unwrap();
        assert_eq!(loaded.items.len(), 1);
    }

    // --- config ---

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(dir.path());
        assert!(config.complete.enabled);
    }

    #[test]
    fn malformed_config_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "not toml [[[").unwrap();
        let config = load_config(dir.path());
        assert_eq!(config.complete.max_suggestions, 6);
    }

    // --- backups ---

    fn eager_store() -> StoreConfig {
        StoreConfig {
            backup_interval_secs: 0,
            backup_keep: 10,
        }
    }

    #[test]
    fn backup_copies_the_board() {
        let dir = TempDir::new().unwrap();
        save_board(dir.path(), &sample_board()).unwrap();
        assert!(maybe_backup(dir.path(), &eager_store()).unwrap());
        let backups = list_backups(&dir.path().join(BACKUP_DIR)).unwrap();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn backup_without_board_is_a_noop() {
        let dir = TempDir::new().unwrap();
        assert!(!maybe_backup(dir.path(), &eager_store()).unwrap());
    }

    #[test]
    fn backup_is_debounced_by_interval() {
        let dir = TempDir::new().unwrap();
        save_board(dir.path(), &sample_board()).unwrap();
        let slow = StoreConfig {
            backup_interval_secs: 3600,
            backup_keep: 10,
        };
        assert!(maybe_backup(dir.path(), &slow).unwrap());
        // Second call lands within the interval.
        assert!(!maybe_backup(dir.path(), &slow).unwrap());
        let backups = list_backups(&dir.path().join(BACKUP_DIR)).unwrap();
        assert_eq!(backups.len(), 1);
    }

    #[test]
    fn backups_are_pruned_to_keep_count() {
        let dir = TempDir::new().unwrap();
        save_board(dir.path(), &sample_board()).unwrap();
        let store = StoreConfig {
            backup_interval_secs: 0,
            backup_keep: 2,
        };
        for _ in 0..4 {
            maybe_backup(dir.path(), &store).unwrap();
            // Distinct millisecond timestamps keep the filenames unique.
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        let backups = list_backups(&dir.path().join(BACKUP_DIR)).unwrap();
        assert_eq!(backups.len(), 2);
    }

    // --- store dir resolution ---

    #[test]
    fn explicit_flag_wins() {
        assert_eq!(
            resolve_store_dir(Some("/tmp/elsewhere")),
            PathBuf::from("/tmp/elsewhere")
        );
    }
}
