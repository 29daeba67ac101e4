//! Reads OCR output files produced by the external recognizer.
//!
//! Each file holds the recognized text of one end-of-run screenshot. The
//! file's modification time stands in for the capture time and becomes the
//! run's identity.

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// One recognized screenshot.
#[derive(Debug, Clone)]
pub struct OcrCapture {
    /// File the text was read from
    pub path: PathBuf,
    /// Full recognized text
    pub text: String,
    /// Modification time in epoch milliseconds
    pub last_modified: i64,
}

impl OcrCapture {
    pub fn new(path: PathBuf, text: String, last_modified: i64) -> Self {
        Self {
            path,
            text,
            last_modified,
        }
    }
}

/// Reads one OCR text file along with its modification time.
pub fn read_capture(path: &Path) -> Result<OcrCapture> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read OCR text: {}", path.display()))?;
    let modified = fs::metadata(path)
        .and_then(|meta| meta.modified())
        .with_context(|| format!("Failed to read modification time: {}", path.display()))?;
    let last_modified = DateTime::<Local>::from(modified).timestamp_millis();

    Ok(OcrCapture::new(path.to_path_buf(), text, last_modified))
}

/// Expands the given paths into the list of files to import.
///
/// Files are kept in the order given. Directories contribute their files
/// with a matching extension, sorted by name.
pub fn collect_paths(inputs: &[PathBuf], extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(input)
            .with_context(|| format!("Failed to list directory: {}", input.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_extension(path, extensions))
            .collect();
        entries.sort();
        files.extend(entries);
    }

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_capture() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("run.txt");
        fs::write(&path, "Tier 5\nWave 120\n").unwrap();

        let capture = read_capture(&path).unwrap();

        assert_eq!(capture.text, "Tier 5\nWave 120\n");
        assert_eq!(capture.path, path);
        assert!(capture.last_modified > 0);
    }

    #[test]
    fn test_read_capture_missing_file() {
        let dir = tempdir().unwrap();
        assert!(read_capture(&dir.path().join("missing.txt")).is_err());
    }

    #[test]
    fn test_collect_paths_expands_directories() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::write(dir.path().join("a.TXT"), "").unwrap();
        fs::write(dir.path().join("c.png"), "").unwrap();
        let single = PathBuf::from("explicit.txt");

        let files = collect_paths(
            &[single.clone(), dir.path().to_path_buf()],
            &["txt".to_string()],
        )
        .unwrap();

        assert_eq!(
            files,
            vec![single, dir.path().join("a.TXT"), dir.path().join("b.txt")]
        );
    }
}
