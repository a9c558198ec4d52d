//! Tool configuration
//!
//! Settings load from an optional TOML file. An explicitly-passed path must
//! exist; otherwise the default location is used when present, and built-in
//! defaults fill in everywhere else.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StitchError, StitchResult};
use crate::timerange::FormatConfig;

const CONFIG_DIR_NAME: &str = "stitchx";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Tool-wide settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StitcherConfig {
    /// Separator between date components (`2024/03/11`)
    pub date_separator: char,
    /// Separator between time components (`14:30:00`)
    pub time_separator: char,
    /// Separator between the date and the time
    pub datetime_separator: char,
    /// Where file selection starts when there is no fresh history
    pub search_directory: String,
    /// Optional cap on the selected time span, in hours
    pub max_span_hours: Option<f64>,
    /// Extensions listed when picking from a folder (empty lists everything)
    pub extensions: Vec<String>,
}

impl Default for StitcherConfig {
    fn default() -> Self {
        Self {
            date_separator: '/',
            time_separator: ':',
            datetime_separator: ' ',
            search_directory: "~/Desktop".to_string(),
            max_span_hours: None,
            extensions: Vec::new(),
        }
    }
}

impl StitcherConfig {
    /// Load settings: from `explicit` when given (must exist), else from
    /// the default location when present, else defaults
    pub fn load(explicit: Option<&Path>) -> StitchResult<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(StitchError::ConfigNotFound {
                    path: path.display().to_string(),
                });
            }
            return Self::read(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::read(&path),
            _ => Ok(Self::default()),
        }
    }

    fn read(path: &Path) -> StitchResult<Self> {
        debug!("Loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// `$XDG_CONFIG_HOME/stitchx/config.toml`, falling back to
    /// `~/.config/stitchx/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        if let Ok(base) = std::env::var("XDG_CONFIG_HOME") {
            if !base.is_empty() {
                return Some(PathBuf::from(base).join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME));
            }
        }

        std::env::var("HOME").ok().map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join(CONFIG_DIR_NAME)
                .join(CONFIG_FILE_NAME)
        })
    }

    /// The separator/format value handed to the range resolver
    pub fn format_config(&self) -> FormatConfig {
        FormatConfig::new(
            self.date_separator,
            self.time_separator,
            self.datetime_separator,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = StitcherConfig::default();

        assert_eq!(config.date_separator, '/');
        assert_eq!(config.time_separator, ':');
        assert_eq!(config.datetime_separator, ' ');
        assert_eq!(config.search_directory, "~/Desktop");
        assert!(config.max_span_hours.is_none());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "date_separator = \"-\"\nmax_span_hours = 2.0\nextensions = [\"mp4\", \"mkv\"]\n",
        )
        .unwrap();

        let config = StitcherConfig::load(Some(&path)).unwrap();
        assert_eq!(config.date_separator, '-');
        assert_eq!(config.max_span_hours, Some(2.0));
        assert_eq!(config.extensions, vec!["mp4", "mkv"]);
        // Unset keys keep their defaults
        assert_eq!(config.time_separator, ':');
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            StitcherConfig::load(Some(&missing)),
            Err(StitchError::ConfigNotFound { .. })
        ));
    }

    #[test]
    fn test_format_config_uses_separators() {
        let config = StitcherConfig {
            date_separator: '-',
            ..StitcherConfig::default()
        };

        assert_eq!(config.format_config().date_format(), "%Y-%m-%d");
    }
}
