//! ffmpeg concat invocation

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::error::StitchResult;

/// A prepared ffmpeg concat run: stream-copies the manifest entries into a
/// single output file
#[derive(Debug, Clone)]
pub struct ConcatJob {
    manifest_path: PathBuf,
    output_path: PathBuf,
}

/// Outcome of a concat run
#[derive(Debug, Clone)]
pub struct ConcatReport {
    pub success: bool,
    pub exit_code: Option<i32>,
    pub output_path: PathBuf,
    /// Whether the output file landed on disk, regardless of exit code
    pub output_saved: bool,
    /// Tail of ffmpeg's stderr, for diagnosis on failure
    pub stderr_tail: String,
}

impl ConcatJob {
    pub fn new(manifest_path: PathBuf, output_path: PathBuf) -> Self {
        Self {
            manifest_path,
            output_path,
        }
    }

    /// The argument vector handed to ffmpeg
    pub fn args(&self) -> Vec<String> {
        vec![
            "-f".to_string(),
            "concat".to_string(),
            "-safe".to_string(),
            "0".to_string(),
            "-i".to_string(),
            self.manifest_path.display().to_string(),
            "-c".to_string(),
            "copy".to_string(),
            self.output_path.display().to_string(),
        ]
    }

    /// The same command with pathing replaced by placeholders, for showing
    /// the user what ran when something goes wrong
    pub fn human_readable(&self) -> String {
        "ffmpeg -f concat -safe 0 -i <file_list_txt> -c copy <output_path>".to_string()
    }

    /// Run ffmpeg with captured output and report the outcome
    pub fn run(&self) -> StitchResult<ConcatReport> {
        debug!("Running ffmpeg concat into {}", self.output_path.display());

        let output = Command::new("ffmpeg").args(self.args()).output()?;

        let stderr = String::from_utf8_lossy(&output.stderr);
        Ok(ConcatReport {
            success: output.status.success(),
            exit_code: output.status.code(),
            output_path: self.output_path.clone(),
            output_saved: self.output_path.exists(),
            stderr_tail: tail_lines(&stderr, 8),
        })
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

fn tail_lines(text: &str, count: usize) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(count);
    lines[start..].join("\n")
}
