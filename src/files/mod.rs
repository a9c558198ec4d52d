//! Filesystem listing and sorting helpers

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, FixedOffset, Local};
use walkdir::WalkDir;

use crate::error::{StitchError, StitchResult};
use crate::timerange::{BoundingRange, ResolvedRange};

/// Options for directory listings
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Include entries whose names begin with a dot
    pub show_hidden: bool,
    /// Keep only files with these extensions (empty keeps everything).
    /// Entries are matched case-insensitively, with or without a leading dot.
    pub extensions: Vec<String>,
}

impl ListOptions {
    pub fn with_extensions(extensions: &[String]) -> Self {
        Self {
            show_hidden: false,
            extensions: extensions.to_vec(),
        }
    }
}

/// List the files directly inside `dir`, name-sorted
pub fn list_files(dir: &Path, options: &ListOptions) -> StitchResult<Vec<PathBuf>> {
    let allowed: Vec<String> = options.extensions.iter().map(|e| normalize_ext(e)).collect();

    let mut files: Vec<PathBuf> = list_entries(dir)?
        .into_iter()
        .filter(|path| path.is_file())
        .filter(|path| options.show_hidden || !is_hidden(path))
        .filter(|path| allowed.is_empty() || has_allowed_ext(path, &allowed))
        .collect();

    files.sort();
    Ok(files)
}

/// List the folders directly inside `dir`, name-sorted
pub fn list_folders(dir: &Path, options: &ListOptions) -> StitchResult<Vec<PathBuf>> {
    let mut folders: Vec<PathBuf> = list_entries(dir)?
        .into_iter()
        .filter(|path| path.is_dir())
        .filter(|path| options.show_hidden || !is_hidden(path))
        .collect();

    folders.sort();
    Ok(folders)
}

fn list_entries(dir: &Path) -> StitchResult<Vec<PathBuf>> {
    if !dir.exists() {
        return Err(StitchError::FolderNotFound {
            path: dir.display().to_string(),
        });
    }

    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            StitchError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "walk error")
            }))
        })?;
        entries.push(entry.into_path());
    }

    Ok(entries)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().starts_with('.'))
        .unwrap_or(false)
}

/// Lowercase and strip any leading dot, so "MP4", ".mp4" and "mp4" agree
fn normalize_ext(ext: &str) -> String {
    ext.trim().trim_start_matches('.').to_lowercase()
}

fn has_allowed_ext(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .map(|ext| allowed.contains(&ext.to_string_lossy().to_lowercase()))
        .unwrap_or(false)
}

/// Modification time of a file, in the local timezone
pub fn modified_at(path: &Path) -> StitchResult<DateTime<FixedOffset>> {
    let modified: SystemTime = std::fs::metadata(path)?.modified()?;
    Ok(DateTime::<Local>::from(modified).fixed_offset())
}

/// Sort paths by modification time
pub fn sort_by_mtime(paths: &mut [PathBuf], newest_first: bool) -> StitchResult<()> {
    let mut keyed: Vec<(DateTime<FixedOffset>, PathBuf)> = paths
        .iter()
        .map(|path| Ok((modified_at(path)?, path.clone())))
        .collect::<StitchResult<_>>()?;

    keyed.sort_by_key(|(mtime, _)| *mtime);
    if newest_first {
        keyed.reverse();
    }

    for (slot, (_, path)) in paths.iter_mut().zip(keyed) {
        *slot = path;
    }
    Ok(())
}

/// The oldest and newest modification times of a file set, rounded out to
/// whole seconds, as a bounding window for time-range resolution
pub fn modified_bounds(paths: &[PathBuf]) -> StitchResult<BoundingRange> {
    let mut times = paths.iter().map(|path| modified_at(path));

    let first = times.next().ok_or(StitchError::NoFiles)??;
    let mut oldest = first;
    let mut newest = first;
    for time in times {
        let time = time?;
        oldest = oldest.min(time);
        newest = newest.max(time);
    }

    Ok(BoundingRange::new(oldest, newest).rounded())
}

/// Keep only the files whose modification time falls inside `range`
pub fn filter_by_modified(paths: Vec<PathBuf>, range: &ResolvedRange) -> StitchResult<Vec<PathBuf>> {
    let mut kept = Vec::new();
    for path in paths {
        let mtime = modified_at(&path)?;
        if mtime >= range.start && mtime <= range.end {
            kept.push(path);
        }
    }
    Ok(kept)
}

/// Compress a path for display by replacing the home directory with `~`
pub fn shorten_home(path: &Path) -> String {
    let display = path.display().to_string();
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => display.replacen(&home, "~", 1),
        _ => display,
    }
}

/// Expand a leading `~` back into the home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~") {
        if let Ok(home) = std::env::var("HOME") {
            if !home.is_empty() {
                return PathBuf::from(format!("{}{}", home, rest));
            }
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, b"x").unwrap();
        path
    }

    #[test]
    fn test_list_files_skips_hidden_and_folders() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b.mp4");
        touch(dir.path(), "a.mp4");
        touch(dir.path(), ".hidden.mp4");
        fs::create_dir(dir.path().join("sub")).unwrap();

        let files = list_files(dir.path(), &ListOptions::default()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a.mp4", "b.mp4"]);
    }

    #[test]
    fn test_list_files_extension_filter() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "clip.mp4");
        touch(dir.path(), "clip.MKV");
        touch(dir.path(), "notes.txt");

        let options = ListOptions::with_extensions(&[".mp4".to_string(), "mkv".to_string()]);
        let files = list_files(dir.path(), &options).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().is_some()));
    }

    #[test]
    fn test_list_files_missing_folder() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");

        assert!(matches!(
            list_files(&missing, &ListOptions::default()),
            Err(StitchError::FolderNotFound { .. })
        ));
    }

    #[test]
    fn test_list_folders() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("z")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        touch(dir.path(), "file.txt");

        let folders = list_folders(dir.path(), &ListOptions::default()).unwrap();
        let names: Vec<String> = folders
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();

        assert_eq!(names, vec!["a", "z"]);
    }

    #[test]
    fn test_modified_bounds_and_filter() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.mp4");
        let b = touch(dir.path(), "b.mp4");

        let bounds = modified_bounds(&[a.clone(), b.clone()]).unwrap();
        assert!(bounds.start <= bounds.end);

        // Every file falls inside its own bounding window
        let range = crate::timerange::ResolvedRange {
            start: bounds.start,
            end: bounds.end,
        };
        let kept = filter_by_modified(vec![a, b], &range).unwrap();
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_modified_bounds_empty_set() {
        assert!(matches!(modified_bounds(&[]), Err(StitchError::NoFiles)));
    }

    #[test]
    fn test_sort_by_mtime_orders_paths() {
        let dir = TempDir::new().unwrap();
        let a = touch(dir.path(), "a.mp4");
        let b = touch(dir.path(), "b.mp4");

        let mut paths = vec![a.clone(), b.clone()];
        sort_by_mtime(&mut paths, false).unwrap();
        let mut newest = vec![a, b];
        sort_by_mtime(&mut newest, true).unwrap();

        assert_eq!(paths.first(), newest.last());
        assert_eq!(paths.last(), newest.first());
    }

    #[test]
    fn test_home_shortening_round_trip() {
        let home = std::env::var("HOME").unwrap_or_default();
        if home.is_empty() {
            return;
        }

        let path = PathBuf::from(&home).join("Desktop");
        let short = shorten_home(&path);
        assert!(short.starts_with('~'));
        assert_eq!(expand_home(&short), path);
    }
}
