//! CLI module for StitchX
//!
//! This module handles command-line argument parsing and command execution.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod args;
pub mod commands;

/// StitchX CLI Video Stitcher
///
/// A command-line tool for concatenating video files with ffmpeg, with
/// interactive file and time-range selection.
#[derive(Parser)]
#[command(name = "stitcher")]
#[command(about = "StitchX CLI Video Stitcher - Join video files without re-encoding")]
#[command(version)]
#[command(long_about = None)]
pub struct Cli {
    /// Logging level
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,

    /// Config file path (default: ~/.config/stitchx/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Stitch a set of video files into one
    Stitch(args::StitchArgs),
    /// Check that the required external programs are installed
    Check,
}
