//! Command implementations

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Duration;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::cli::args::StitchArgs;
use crate::config::StitcherConfig;
use crate::engine::{self, ConcatJob, Manifest, ToolStatus};
use crate::error::StitchError;
use crate::files::{self, ListOptions};
use crate::history::HistoryStore;
use crate::picker;
use crate::prompt;
use crate::timerange::{clamp_span, ClampAnchor, RangeResolver, ResolvedRange};

/// Execute the stitch command
pub fn stitch(args: StitchArgs, config: &StitcherConfig) -> Result<()> {
    info!("Starting stitch operation");

    let status = engine::check_requirements();
    warn_missing_tools(status);

    let history = HistoryStore::default_location();
    let search_dir = history.search_directory(&config.search_directory);

    // Select the input files: from a provided folder, through ranger, or
    // through a plain menu when ranger is not installed
    let mut inputs = match &args.folder {
        Some(folder) => list_folder_inputs(folder, &args, config)?,
        None if picker::ranger_available() => {
            picker::preprompt(
                "Please use ranger to select video files for stitching\n\
                 \x20 --> Use spacebar to select multiple videos.\n\
                 \x20 --> When finished, hit enter to complete selection.",
            )?;
            picker::select_files(&search_dir)?
        }
        None => select_inputs_from_menu(&search_dir, &args, config)?,
    };

    if inputs.is_empty() {
        bail!("No files found, nothing to stitch");
    }

    // Narrow by modification time when asked to
    if args.modified || args.since.is_some() || args.until.is_some() {
        inputs = filter_inputs_by_mtime(inputs, &args, config)?;
        if inputs.is_empty() {
            bail!("No files were modified in the selected time range");
        }
    }

    // Remember where these files came from, for the next run
    let save_folder_default = match history.remember(&inputs[0]) {
        Ok(parent) => parent,
        Err(e) => {
            warn!("Couldn't update history file: {}", e);
            inputs[0]
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."))
        }
    };

    print_input_listing(&inputs);

    if inputs.len() < 2 {
        bail!("Not enough files to stitch");
    }

    let (save_ext, mixed) = engine::pick_output_extension(&inputs)?;
    if mixed {
        println!();
        println!("{}", "Got more than 1 file extension type!".yellow());
        println!("Will use: {}", save_ext);
        println!("However, different extensions may cause errors while stitching...");
    }

    // Figure out where the result goes
    let default_name = engine::default_output_name(inputs.len());
    let save_name = match &args.outname {
        Some(name) => name.clone(),
        None if args.yes => default_name,
        None => prompt::prompt_with_default("Enter output file name", &default_name)?,
    };

    let save_folder = match &args.outpath {
        Some(path) => {
            let expanded = files::expand_home(&path.to_string_lossy());
            std::fs::create_dir_all(&expanded)
                .with_context(|| format!("Couldn't create output folder: {}", expanded.display()))?;
            expanded
        }
        None => save_folder_default,
    };

    let save_path = save_folder.join(format!("{}{}", save_name, save_ext));

    if save_path.exists() {
        let overwrite = args.yes
            || prompt::confirm(
                &format!("Output file already exists: {}. Overwrite?", save_path.display()),
                false,
            )?;
        if !overwrite {
            println!("\nCancelled.");
            return Ok(());
        }
        std::fs::remove_file(&save_path)
            .with_context(|| format!("Couldn't remove existing file: {}", save_path.display()))?;
    }

    if !args.yes {
        let go = prompt::confirm(
            &format!("Stitch {} files into {}?", inputs.len(), save_path.display()),
            true,
        )?;
        if !go {
            println!("\nCancelled.");
            return Ok(());
        }
    }

    println!();
    println!("Stitching videos...");

    let manifest = Manifest::write(&inputs)?;
    let job = ConcatJob::new(manifest.path().to_path_buf(), save_path);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap()
            .tick_strings(&["|", "/", "-", "\\", "|"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner.set_message("Running ffmpeg concat");

    let report = job.run()?;
    spinner.finish_and_clear();

    report_outcome(&report, &job)
}

/// Execute the check command
pub fn check() -> Result<()> {
    let status = engine::check_requirements();

    println!();
    print_tool_status("ffmpeg", status.ffmpeg, "sudo apt install ffmpeg");
    print_tool_status("ranger", status.ranger, "sudo apt install ranger");
    println!();

    if !status.ffmpeg {
        bail!("ffmpeg is required for stitching");
    }
    if !status.ranger {
        println!("ranger is only needed for interactive selection; --folder works without it");
    }

    Ok(())
}

fn print_tool_status(tool: &str, found: bool, hint: &str) {
    if found {
        println!("  {} {}", "ok".green().bold(), tool);
    } else {
        println!("  {} {} (install with: {})", "missing".red().bold(), tool, hint);
    }
}

fn warn_missing_tools(status: ToolStatus) {
    if !status.ffmpeg {
        println!();
        println!("{}", "WARNING: Couldn't find ffmpeg! Stitching will fail...".yellow());
        println!("On Ubuntu, install with:");
        println!();
        println!("  sudo apt install ffmpeg");
    }
}

fn list_folder_inputs(
    folder: &Path,
    args: &StitchArgs,
    config: &StitcherConfig,
) -> Result<Vec<PathBuf>> {
    let folder = files::expand_home(&folder.to_string_lossy());
    if !folder.exists() {
        bail!("Provided input folder path is not valid: {}", folder.display());
    }

    println!();
    println!("Using input files from provided folder path:");
    println!("@ {}", folder.display());

    let extensions = selection_extensions(args, config);
    Ok(files::list_files(&folder, &ListOptions::with_extensions(&extensions))?)
}

/// Numbered-menu selection over the search directory, used when ranger is
/// not installed
fn select_inputs_from_menu(
    search_dir: &Path,
    args: &StitchArgs,
    config: &StitcherConfig,
) -> Result<Vec<PathBuf>> {
    let extensions = selection_extensions(args, config);
    let candidates = files::list_files(search_dir, &ListOptions::with_extensions(&extensions))?;
    if candidates.is_empty() {
        return Ok(Vec::new());
    }

    println!();
    println!("Selecting from: {}", files::shorten_home(search_dir));

    let names: Vec<String> = candidates
        .iter()
        .map(|path| {
            path.file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string())
        })
        .collect();

    let picked = prompt::multi_select_from_list(
        "Select video files to stitch (space to mark, enter to finish)",
        &names,
    )?;

    Ok(picked.into_iter().map(|i| candidates[i].clone()).collect())
}

fn selection_extensions(args: &StitchArgs, config: &StitcherConfig) -> Vec<String> {
    if args.exts.is_empty() {
        config.extensions.clone()
    } else {
        args.exts.clone()
    }
}

/// Resolve a modification-time range (interactively unless --since/--until
/// were given) and keep only the files inside it
fn filter_inputs_by_mtime(
    inputs: Vec<PathBuf>,
    args: &StitchArgs,
    config: &StitcherConfig,
) -> Result<Vec<PathBuf>> {
    let resolver = RangeResolver::new(config.format_config());
    let bounds = files::modified_bounds(&inputs)?;

    let range = if args.since.is_some() || args.until.is_some() {
        resolver.resolve(
            args.since.as_deref().unwrap_or(""),
            args.until.as_deref().unwrap_or(""),
            &bounds,
        )?
    } else {
        prompt::prompt_datetime_range(&resolver, bounds, true)?
    };

    let range = apply_span_cap(range, args.max_span_hours.or(config.max_span_hours));
    prompt::print_selected_range(&resolver, &range);

    Ok(files::filter_by_modified(inputs, &range)?)
}

fn apply_span_cap(range: ResolvedRange, max_span_hours: Option<f64>) -> ResolvedRange {
    match max_span_hours {
        Some(hours) => {
            let max_span = Duration::seconds((hours * 3600.0).round() as i64);
            clamp_span(range, max_span, ClampAnchor::End)
        }
        None => range,
    }
}

fn print_input_listing(inputs: &[PathBuf]) {
    println!();
    println!("Files to stitch:");
    println!("(in order)");
    println!();
    for input in inputs {
        let name = input
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input.display().to_string());
        println!("  {}", name);
    }
}

fn report_outcome(report: &engine::ConcatReport, job: &ConcatJob) -> Result<()> {
    if report.success {
        println!();
        println!("{}", "*** Done! No errors ***".green().bold());
        println!();
        println!("Saved result:");
        println!("@ {}", report.output_path.display());
        info!("Stitch operation completed successfully");
        return Ok(());
    }

    let code = report
        .exit_code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "signal".to_string());

    println!();
    println!("{}", "!".repeat(48).red());
    println!();
    println!("Possible error! Got return code: {}", code);
    println!("File {} saved...", if report.output_saved { "was" } else { "was not" });
    if !report.stderr_tail.is_empty() {
        println!();
        println!("ffmpeg output:");
        println!("{}", report.stderr_tail);
    }
    println!();
    println!("Using command:");
    println!("  {}", job.human_readable());
    println!();
    println!("{}", "!".repeat(48).red());

    Err(StitchError::ConcatFailed {
        code,
        saved: report.output_saved,
    }
    .into())
}
