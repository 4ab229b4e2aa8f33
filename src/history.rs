//! Search-history persistence.
//!
//! A bounded recency list stored as JSON under `~/.fscout/`. One entry
//! per (path, keyword) pair, newest first; re-running a search moves it
//! to the top. Corrupt or missing files read as empty rather than
//! failing a search.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, ScoutError};
use crate::ignore_rules::APP_CONFIG_DIR;

/// Upper bound on stored entries.
pub const MAX_HISTORY_ITEMS: usize = 20;

const HISTORY_FILE_NAME: &str = "history.json";

/// Environment variable overriding the history file location.
pub const HISTORY_FILE_ENV: &str = "FSCOUT_HISTORY_FILE";

/// One recorded search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The search root.
    pub path: PathBuf,
    /// The name query, possibly empty.
    pub keyword: String,
    pub time: DateTime<Utc>,
}

/// Resolve the history file location. `None` only when no home
/// directory can be determined and the env override is unset.
pub fn history_file() -> Option<PathBuf> {
    env::var_os(HISTORY_FILE_ENV)
        .map(PathBuf::from)
        .or_else(|| {
            dirs::home_dir().map(|home| home.join(APP_CONFIG_DIR).join(HISTORY_FILE_NAME))
        })
}

/// Read history from an explicit file. Unreadable or unparseable
/// content reads as empty.
pub fn read_history_from(file: &Path) -> Vec<HistoryEntry> {
    let Ok(content) = fs::read_to_string(file) else {
        return Vec::new();
    };
    serde_json::from_str(&content).unwrap_or_default()
}

/// Write history to an explicit file, creating parent directories.
pub fn write_history_to(file: &Path, items: &[HistoryEntry]) -> Result<()> {
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).map_err(|source| ScoutError::write_error(parent, source))?;
    }
    let json =
        serde_json::to_string_pretty(items).map_err(|source| ScoutError::json_error(file, source))?;
    fs::write(file, json).map_err(|source| ScoutError::write_error(file, source))
}

/// Record a search in an explicit file: dedup by (path, keyword), newest
/// first, truncated to `limit`. Returns the list as written.
pub fn add_history_at(
    file: &Path,
    entry: HistoryEntry,
    limit: usize,
) -> Result<Vec<HistoryEntry>> {
    let mut items = read_history_from(file);
    items.retain(|it| !(it.path == entry.path && it.keyword == entry.keyword));
    items.push(entry);
    items.sort_by(|a, b| b.time.cmp(&a.time));
    items.truncate(limit);
    write_history_to(file, &items)?;
    Ok(items)
}

fn default_file() -> Result<PathBuf> {
    history_file().ok_or_else(|| {
        ScoutError::Config("could not determine a home directory for history".to_string())
    })
}

/// Read history from the default location.
pub fn read_history() -> Vec<HistoryEntry> {
    history_file()
        .map(|file| read_history_from(&file))
        .unwrap_or_default()
}

/// Record a search in the default location.
pub fn add_history(entry: HistoryEntry, limit: usize) -> Result<Vec<HistoryEntry>> {
    add_history_at(&default_file()?, entry, limit)
}

/// Drop all recorded searches.
pub fn clear_history() -> Result<()> {
    write_history_to(&default_file()?, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn entry(path: &str, keyword: &str, secs: i64) -> HistoryEntry {
        HistoryEntry {
            path: PathBuf::from(path),
            keyword: keyword.to_string(),
            time: Utc.timestamp_opt(secs, 0).unwrap(),
        }
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_history_from(&dir.path().join("none.json")).is_empty());
    }

    #[test]
    fn test_read_corrupt_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("history.json");
        fs::write(&file, "{not json").unwrap();
        assert!(read_history_from(&file).is_empty());
    }

    #[test]
    fn test_roundtrip() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested").join("history.json");
        let items = vec![entry("/a", "foo", 10)];
        write_history_to(&file, &items).unwrap();
        assert_eq!(read_history_from(&file), items);
    }

    #[test]
    fn test_add_orders_newest_first() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("history.json");
        add_history_at(&file, entry("/a", "", 10), MAX_HISTORY_ITEMS).unwrap();
        let items = add_history_at(&file, entry("/b", "", 20), MAX_HISTORY_ITEMS).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].path, PathBuf::from("/b"));
        assert_eq!(items[1].path, PathBuf::from("/a"));
    }

    #[test]
    fn test_add_dedups_same_path_and_keyword() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("history.json");
        add_history_at(&file, entry("/a", "foo", 10), MAX_HISTORY_ITEMS).unwrap();
        let items = add_history_at(&file, entry("/a", "foo", 30), MAX_HISTORY_ITEMS).unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].time, Utc.timestamp_opt(30, 0).unwrap());
    }

    #[test]
    fn test_same_path_different_keyword_kept_apart() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("history.json");
        add_history_at(&file, entry("/a", "foo", 10), MAX_HISTORY_ITEMS).unwrap();
        let items = add_history_at(&file, entry("/a", "bar", 20), MAX_HISTORY_ITEMS).unwrap();
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_add_truncates_to_limit() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("history.json");
        for i in 0..5 {
            add_history_at(&file, entry(&format!("/p{i}"), "", i), 3).unwrap();
        }
        let items = read_history_from(&file);
        assert_eq!(items.len(), 3);
        // The newest three survive.
        assert_eq!(items[0].path, PathBuf::from("/p4"));
        assert_eq!(items[2].path, PathBuf::from("/p2"));
    }
}
