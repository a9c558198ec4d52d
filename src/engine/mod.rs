//! Core stitching engine module

use std::collections::HashMap;
use std::path::Path;
use std::process::Command;

pub mod concat;
pub mod manifest;

pub use concat::{ConcatJob, ConcatReport};
pub use manifest::Manifest;

use crate::error::{StitchError, StitchResult};

/// Availability of the external programs the stitcher leans on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolStatus {
    pub ffmpeg: bool,
    pub ranger: bool,
}

/// Probe for `ffmpeg` and `ranger` on the PATH
pub fn check_requirements() -> ToolStatus {
    ToolStatus {
        ffmpeg: tool_exists("ffmpeg"),
        ranger: tool_exists("ranger"),
    }
}

/// Check whether a program is on the PATH, using the lookup command that
/// fits the platform
pub fn tool_exists(tool: &str) -> bool {
    let lookup = if cfg!(windows) { "where" } else { "which" };

    Command::new(lookup)
        .arg(tool)
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Pick the output extension as the most common extension among the input
/// files. Returns the extension (with leading dot) and whether the inputs
/// were mixed.
pub fn pick_output_extension(paths: &[impl AsRef<Path>]) -> StitchResult<(String, bool)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for path in paths {
        let ext = path
            .as_ref()
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        *counts.entry(ext).or_insert(0) += 1;
    }

    let winner = counts
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(ext, _)| ext.clone())
        .ok_or(StitchError::NoFiles)?;

    Ok((winner, counts.len() > 1))
}

/// Default output file name for a run over `count` inputs
pub fn default_output_name(count: usize) -> String {
    format!("stitched_{}_files", count)
}
