//! Error handling module for StitchX

use thiserror::Error;

use crate::timerange::RangeError;

/// Main error type for StitchX operations
#[derive(Error, Debug)]
pub enum StitchError {
    /// Time range resolution failed
    #[error(transparent)]
    Range(#[from] RangeError),

    /// A required external program is not installed
    #[error("Could not find program '{tool}'. To install on Ubuntu, use: {hint}")]
    ToolMissing { tool: String, hint: String },

    /// The user backed out of a file selection
    #[error("File selection cancelled")]
    SelectionCancelled,

    /// A selected path no longer exists
    #[error("Selected file path is invalid: {path}")]
    InvalidSelection { path: String },

    /// Search folder not found or not listable
    #[error("Folder not found: {path}")]
    FolderNotFound { path: String },

    /// Nothing matched the search
    #[error("No files found, nothing to stitch")]
    NoFiles,

    /// The concatenation run failed
    #[error("ffmpeg exited with code {code} (output file saved: {saved})")]
    ConcatFailed { code: String, saved: bool },

    /// Configuration file could not be read
    #[error("Config file does not exist: {path}")]
    ConfigNotFound { path: String },

    /// Configuration file could not be parsed
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// History file could not be parsed
    #[error("Failed to read history: {0}")]
    History(#[from] serde_json::Error),

    /// Prompt interaction error
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for StitchX operations
pub type StitchResult<T> = std::result::Result<T, StitchError>;
