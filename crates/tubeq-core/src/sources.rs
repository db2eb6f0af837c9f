//! URL sources for batch (preset) runs.
//!
//! Two kinds of sources feed a preset run: a plain batch file with one URL
//! per line, and an archive directory whose file names carry YouTube video
//! ids in brackets (`Title [dQw4w9WgXcQ].mkv`), used to re-check previously
//! downloaded videos for availability.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

/// `[<11 character video id>]` as written by the default output template.
static VIDEO_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([a-zA-Z0-9_-]{11})\]").expect("valid video id pattern"));

const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Errors from reading a URL source.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("No URLs found in {0}")]
    Empty(PathBuf),
}

/// URLs from a batch file: one per non-blank line, trimmed.
pub fn urls_from_batch_file(path: &Path) -> Result<Vec<String>, SourceError> {
    let contents = fs::read_to_string(path).map_err(|e| SourceError::Read {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let urls: Vec<String> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect();

    non_empty(urls, path)
}

/// Watch URLs for every bracketed video id found in file names under `dir`.
///
/// The walk is recursive and sorted by file name so the queue order is
/// stable. Unreadable entries are skipped.
pub fn urls_from_archive_dir(dir: &Path) -> Result<Vec<String>, SourceError> {
    if !dir.is_dir() {
        return Err(SourceError::Read {
            path: dir.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let urls: Vec<String> = WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| {
            entry
                .map_err(|e| debug!(error = %e, "Skipping unreadable archive entry"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| video_id(&entry.file_name().to_string_lossy()).map(watch_url))
        .collect();

    non_empty(urls, dir)
}

/// First bracketed video id in a file name.
pub fn video_id(file_name: &str) -> Option<String> {
    VIDEO_ID_PATTERN
        .captures(file_name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn watch_url(id: String) -> String {
    format!("{WATCH_URL_PREFIX}{id}")
}

fn non_empty(urls: Vec<String>, source: &Path) -> Result<Vec<String>, SourceError> {
    if urls.is_empty() {
        Err(SourceError::Empty(source.to_path_buf()))
    } else {
        Ok(urls)
    }
}
