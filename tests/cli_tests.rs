use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn stitcher() -> (Command, TempDir) {
    let mut cmd = Command::cargo_bin("stitcher").unwrap();
    // Keep history/config reads and writes out of the real home directory
    let home = TempDir::new().unwrap();
    cmd.env("HOME", home.path());
    cmd.env("XDG_CONFIG_HOME", home.path().join(".config"));
    (cmd, home)
}

#[test]
fn test_help_lists_commands() {
    let (mut cmd, _home) = stitcher();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("stitch").and(predicate::str::contains("check")));
}

#[test]
fn test_stitch_rejects_missing_folder() {
    let (mut cmd, _home) = stitcher();
    cmd.args(["stitch", "--folder", "/definitely/not/here", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid"));
}

#[test]
fn test_stitch_empty_folder_has_nothing_to_do() {
    let dir = TempDir::new().unwrap();

    let (mut cmd, _home) = stitcher();
    cmd.args(["stitch", "--yes", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_stitch_needs_at_least_two_files() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("only.mp4"), b"x").unwrap();

    let (mut cmd, _home) = stitcher();
    cmd.args(["stitch", "--yes", "--folder"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not enough files"));
}

#[test]
fn test_missing_config_file_is_reported() {
    let (mut cmd, _home) = stitcher();
    cmd.args(["--config", "/definitely/not/here.toml", "check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file does not exist"));
}

#[test]
fn test_check_reports_tools() {
    let (mut cmd, _home) = stitcher();
    cmd.arg("check")
        .assert()
        .stdout(predicate::str::contains("ffmpeg").and(predicate::str::contains("ranger")));
}
