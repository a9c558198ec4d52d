//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the stitch command
#[derive(Args, Debug)]
pub struct StitchArgs {
    /// Folder containing videos to stitch (skips interactive selection)
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Output video file name (without extension)
    #[arg(short = 'n', long)]
    pub outname: Option<String>,

    /// Output video folder path (default: alongside the inputs)
    #[arg(short = 'p', long)]
    pub outpath: Option<PathBuf>,

    /// Only list files with these extensions (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub exts: Vec<String>,

    /// Filter inputs by modification time, prompting for a range
    #[arg(long)]
    pub modified: bool,

    /// Modification-time range start (absolute like "2024/03/11 14:00:00",
    /// or relative like "+1:30:00"; implies a modification-time filter)
    #[arg(long)]
    pub since: Option<String>,

    /// Modification-time range end (same formats as --since)
    #[arg(long)]
    pub until: Option<String>,

    /// Cap the modification-time span, anchored at its end
    #[arg(long)]
    pub max_span_hours: Option<f64>,

    /// Accept defaults and skip confirmation prompts
    #[arg(short, long)]
    pub yes: bool,
}
