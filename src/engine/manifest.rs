//! Concat manifest generation
//!
//! ffmpeg's concat demuxer reads a text file of `file '<path>'` lines. The
//! manifest lives in a temporary directory that is cleaned up on drop.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::error::StitchResult;

const MANIFEST_FILE_NAME: &str = "stitchlist.txt";

/// A written concat manifest, valid for as long as this value is alive
#[derive(Debug)]
pub struct Manifest {
    // Held so the backing directory outlives the ffmpeg run
    _dir: TempDir,
    path: PathBuf,
}

impl Manifest {
    /// Write the manifest for `inputs` into a fresh temporary directory
    pub fn write(inputs: &[impl AsRef<Path>]) -> StitchResult<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join(MANIFEST_FILE_NAME);

        std::fs::write(&path, render_entries(inputs))?;

        Ok(Self { _dir: dir, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Render the `file '...'` entry lines for the manifest
pub fn render_entries(inputs: &[impl AsRef<Path>]) -> String {
    let lines: Vec<String> = inputs
        .iter()
        .map(|path| format!("file '{}'", escape_path(path.as_ref())))
        .collect();

    lines.join("\n")
}

/// Escape a path for a single-quoted concat entry. The demuxer has no
/// in-quote escapes, so a quote closes the string, inserts an escaped
/// quote, and reopens it.
fn escape_path(path: &Path) -> String {
    path.display().to_string().replace('\'', r"'\''")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_entries() {
        let inputs = vec![PathBuf::from("/videos/a.mp4"), PathBuf::from("/videos/b.mp4")];

        assert_eq!(
            render_entries(&inputs),
            "file '/videos/a.mp4'\nfile '/videos/b.mp4'"
        );
    }

    #[test]
    fn test_quotes_in_paths_escaped() {
        let inputs = vec![PathBuf::from("/videos/it's here.mp4")];

        assert_eq!(
            render_entries(&inputs),
            r"file '/videos/it'\''s here.mp4'"
        );
    }

    #[test]
    fn test_manifest_written_to_disk() {
        let inputs = vec![PathBuf::from("/videos/a.mp4")];
        let manifest = Manifest::write(&inputs).unwrap();

        let contents = std::fs::read_to_string(manifest.path()).unwrap();
        assert_eq!(contents, "file '/videos/a.mp4'");
    }
}
