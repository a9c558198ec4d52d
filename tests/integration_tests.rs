use std::fs;
use std::path::PathBuf;

use chrono::{Duration, FixedOffset, TimeZone};
use tempfile::TempDir;

use stitchx_cli::engine::{self, ConcatJob, Manifest};
use stitchx_cli::files::{self, ListOptions};
use stitchx_cli::timerange::{clamp_span, BoundingRange, ClampAnchor, RangeResolver};
use stitchx_cli::{FormatConfig, StitcherConfig};

fn touch(dir: &std::path::Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, b"x").unwrap();
    path
}

#[test]
fn test_listing_feeds_manifest_and_job() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "clip_b.mp4");
    touch(dir.path(), "clip_a.mp4");
    touch(dir.path(), "notes.txt");

    let options = ListOptions::with_extensions(&["mp4".to_string()]);
    let inputs = files::list_files(dir.path(), &options).unwrap();
    assert_eq!(inputs.len(), 2);

    let (ext, mixed) = engine::pick_output_extension(&inputs).unwrap();
    assert_eq!(ext, ".mp4");
    assert!(!mixed);

    let manifest = Manifest::write(&inputs).unwrap();
    let contents = fs::read_to_string(manifest.path()).unwrap();

    // Entries appear in listing order, names sorted
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("clip_a.mp4"));
    assert!(lines[1].contains("clip_b.mp4"));

    let job = ConcatJob::new(manifest.path().to_path_buf(), dir.path().join("out.mp4"));
    let args = job.args();
    assert_eq!(args[0], "-f");
    assert_eq!(args[1], "concat");
    assert!(args.contains(&manifest.path().display().to_string()));
}

#[test]
fn test_mtime_window_selects_listed_files() {
    let dir = TempDir::new().unwrap();
    let a = touch(dir.path(), "a.mp4");
    let b = touch(dir.path(), "b.mp4");

    let inputs = vec![a, b];
    let bounds = files::modified_bounds(&inputs).unwrap();

    // Resolve the full default window and confirm nothing is dropped
    let resolver = RangeResolver::new(FormatConfig::default());
    let range = resolver.resolve("", "", &bounds).unwrap();
    let kept = files::filter_by_modified(inputs.clone(), &range).unwrap();
    assert_eq!(kept.len(), 2);

    // A window ending before the bounds drops everything
    let early = resolver
        .resolve("2001/01/01 00:00:00", "2001/01/01 00:00:01", &bounds);
    let early = early.unwrap();
    let kept = files::filter_by_modified(inputs, &early).unwrap();
    assert!(kept.is_empty());
}

#[test]
fn test_config_separators_reach_the_resolver() {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "date_separator = \"-\"\ntime_separator = \".\"\ndatetime_separator = \"T\"\n",
    )
    .unwrap();

    let config = StitcherConfig::load(Some(&config_path)).unwrap();
    let resolver = RangeResolver::new(config.format_config());

    let tz = FixedOffset::east_opt(0).unwrap();
    let bounds = BoundingRange::new(
        tz.with_ymd_and_hms(2024, 3, 11, 10, 0, 0).unwrap(),
        tz.with_ymd_and_hms(2024, 3, 11, 12, 0, 0).unwrap(),
    );

    let range = resolver
        .resolve("2024-03-11T10.30.00", "2024-03-11T11.00.00", &bounds)
        .unwrap();
    assert_eq!(
        range.start,
        tz.with_ymd_and_hms(2024, 3, 11, 10, 30, 0).unwrap()
    );
    assert_eq!(
        range.end,
        tz.with_ymd_and_hms(2024, 3, 11, 11, 0, 0).unwrap()
    );
}

#[test]
fn test_relative_window_with_span_cap() {
    let tz = FixedOffset::east_opt(0).unwrap();
    let bounds = BoundingRange::new(
        tz.with_ymd_and_hms(2024, 3, 11, 8, 0, 0).unwrap(),
        tz.with_ymd_and_hms(2024, 3, 11, 20, 0, 0).unwrap(),
    );

    let resolver = RangeResolver::new(FormatConfig::default());

    // End 30 minutes before the window closes, start 4 hours before that
    let range = resolver.resolve("-4:00:00", "-0:30:00", &bounds).unwrap();
    assert_eq!(
        range.end,
        tz.with_ymd_and_hms(2024, 3, 11, 19, 30, 0).unwrap()
    );
    assert_eq!(
        range.start,
        tz.with_ymd_and_hms(2024, 3, 11, 15, 30, 0).unwrap()
    );

    // Capping at one hour keeps the end anchored
    let capped = clamp_span(range, Duration::hours(1), ClampAnchor::End);
    assert_eq!(capped.end, range.end);
    assert_eq!(
        capped.start,
        tz.with_ymd_and_hms(2024, 3, 11, 18, 30, 0).unwrap()
    );
}
