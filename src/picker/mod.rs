//! Terminal file selection via ranger
//!
//! ranger takes over the terminal, writes the marked paths into a
//! choosefiles target, and exits. Selection state comes back through that
//! file: no file means the user backed out.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::debug;

use crate::engine::tool_exists;
use crate::error::{StitchError, StitchResult};

const CHOOSEFILES_NAME: &str = "ranger_choosefiles";

pub fn ranger_available() -> bool {
    tool_exists("ranger")
}

/// Launch ranger at `start_dir` and return the files the user marked,
/// sorted. The terminal is handed to ranger for the duration.
pub fn select_files(start_dir: &Path) -> StitchResult<Vec<PathBuf>> {
    if !ranger_available() {
        return Err(StitchError::ToolMissing {
            tool: "ranger".to_string(),
            hint: "sudo apt install ranger".to_string(),
        });
    }

    let launch_dir = if start_dir.exists() {
        start_dir.to_path_buf()
    } else {
        PathBuf::from("/")
    };

    let temp_dir = TempDir::new()?;
    let choosefiles_path = temp_dir.path().join(CHOOSEFILES_NAME);

    debug!("Launching ranger in {}", launch_dir.display());
    Command::new("ranger")
        .arg(&launch_dir)
        .arg("--choosefiles")
        .arg(&choosefiles_path)
        .status()?;

    // ranger only writes the choosefiles target when a selection was made
    if !choosefiles_path.exists() {
        return Err(StitchError::SelectionCancelled);
    }

    let contents = std::fs::read_to_string(&choosefiles_path)?;
    let mut selected: Vec<PathBuf> = contents.lines().map(PathBuf::from).collect();

    for path in &selected {
        if !path.exists() {
            return Err(StitchError::InvalidSelection {
                path: path.display().to_string(),
            });
        }
    }

    selected.sort();
    Ok(selected)
}

/// Print some context before ranger takes the terminal, and wait for Enter
pub fn preprompt(message: &str) -> StitchResult<()> {
    println!("\n{}", message);
    print!("  Press Enter key to continue...");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}
