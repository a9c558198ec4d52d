//! Search-directory history
//!
//! Remembers where the user last picked files from, so the next run starts
//! in the same place. The record goes stale after a day, at which point the
//! default search directory is used instead.

use std::path::{Path, PathBuf};

use chrono::{Duration, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StitchResult;
use crate::files::{expand_home, shorten_home};

const HISTORY_FILE_NAME: &str = ".stitcher_history.json";
const HISTORY_DATE_FORMAT: &str = "%Y/%m/%d";

/// On-disk history record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryRecord {
    pub search_directory: String,
    pub last_used_date: String,
}

/// Loads and saves the history record at a fixed location
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The default store location: the user's home directory when known,
    /// the working directory otherwise
    pub fn default_location() -> Self {
        let base = std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base.join(HISTORY_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The remembered search directory, expanded, when the record exists
    /// and is less than a day old; `fallback` otherwise
    pub fn search_directory(&self, fallback: &str) -> PathBuf {
        match self.load() {
            Ok(Some(record)) if record_is_fresh(&record) => {
                debug!("Using remembered search directory: {}", record.search_directory);
                expand_home(&record.search_directory)
            }
            Ok(_) => expand_home(fallback),
            Err(e) => {
                debug!("Ignoring unreadable history file: {}", e);
                expand_home(fallback)
            }
        }
    }

    /// Remember the parent directory of a selected file, dated today
    pub fn remember(&self, selected_file: &Path) -> StitchResult<PathBuf> {
        let parent = selected_file
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let record = HistoryRecord {
            search_directory: shorten_home(&parent),
            last_used_date: Local::now().format(HISTORY_DATE_FORMAT).to_string(),
        };
        self.save(&record)?;

        Ok(parent)
    }

    fn load(&self) -> StitchResult<Option<HistoryRecord>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, record: &HistoryRecord) -> StitchResult<()> {
        let contents = serde_json::to_string_pretty(record)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

fn record_is_fresh(record: &HistoryRecord) -> bool {
    let Ok(date) = NaiveDate::parse_from_str(&record.last_used_date, HISTORY_DATE_FORMAT) else {
        return false;
    };
    let Some(recorded) = date.and_hms_opt(0, 0, 0) else {
        return false;
    };

    let age = Local::now().naive_local() - recorded;
    age < Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remember_then_reload() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let file = dir.path().join("videos").join("a.mp4");
        std::fs::create_dir_all(file.parent().unwrap()).unwrap();
        std::fs::write(&file, b"x").unwrap();

        let parent = store.remember(&file).unwrap();
        assert_eq!(parent, dir.path().join("videos"));

        // Just written, so the record is fresh
        let loaded = store.search_directory("~/Desktop");
        assert_eq!(loaded, dir.path().join("videos"));
    }

    #[test]
    fn test_stale_record_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("history.json"));

        let stale = HistoryRecord {
            search_directory: "/somewhere/old".to_string(),
            last_used_date: "1999/01/01".to_string(),
        };
        store.save(&stale).unwrap();

        let loaded = store.search_directory("/tmp");
        assert_eq!(loaded, PathBuf::from("/tmp"));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let store = HistoryStore::new(dir.path().join("missing.json"));

        assert_eq!(store.search_directory("/tmp"), PathBuf::from("/tmp"));
    }

    #[test]
    fn test_garbage_record_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, b"not json").unwrap();

        let store = HistoryStore::new(path);
        assert_eq!(store.search_directory("/tmp"), PathBuf::from("/tmp"));
    }
}
