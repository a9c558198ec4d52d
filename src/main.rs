//! StitchX CLI Video Stitcher
//!
//! A command-line tool that joins video files end-to-end with ffmpeg's
//! concat demuxer, without re-encoding.
//!
//! # Features
//!
//! - Interactive file selection through ranger, or folder-based via --folder
//! - Modification-time filtering with absolute or relative range expressions
//! - Remembers the last search directory between runs
//! - Stream-copy concatenation (fast, lossless)
//!
//! # Usage
//!
//! ```bash
//! stitcher stitch --folder ~/Videos/clips --outname holiday_reel
//! stitcher stitch --modified
//! stitcher check
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stitchx_cli::cli::{commands, Cli, Commands};
use stitchx_cli::config::StitcherConfig;

/// Main entry point for the StitchX CLI application
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over the CLI flag when set
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cli.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting StitchX CLI Video Stitcher");

    let config = StitcherConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Stitch(args) => {
            info!("Executing stitch command");
            commands::stitch(args, &config)?;
        }
        Commands::Check => {
            info!("Executing check command");
            commands::check()?;
        }
    }

    info!("StitchX CLI completed successfully");
    Ok(())
}
