//! Locating the newest probe file in a logs directory
//!
//! The probing routine writes each run into its own piano folder, so files are
//! searched one level below the logs directory as well.

use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;
use walkdir::WalkDir;

use crate::core::context::Section;

/// How deep below the logs directory to look
const MAX_DEPTH: usize = 2;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("No *_Upper.csv or *_Lower.csv probe files found in {0}")]
    NotFound(PathBuf),

    #[error("Failed to scan {path}: {message}")]
    Walk { path: PathBuf, message: String },
}

/// True for files named `*_Upper.csv` or `*_Lower.csv`
pub fn is_probe_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    let Some(stem) = name.strip_suffix(".csv") else {
        return false;
    };
    Section::from_suffix(stem).is_some()
}

/// Most recently modified probe file under `dir`
pub fn find_latest_probe_csv(dir: &Path) -> Result<PathBuf, DiscoverError> {
    let mut latest: Option<(SystemTime, PathBuf)> = None;

    for entry in WalkDir::new(dir).max_depth(MAX_DEPTH) {
        let entry = entry.map_err(|e| DiscoverError::Walk {
            path: dir.to_path_buf(),
            message: e.to_string(),
        })?;

        if !entry.file_type().is_file() || !is_probe_file(entry.path()) {
            continue;
        }

        let modified = entry
            .metadata()
            .ok()
            .and_then(|m| m.modified().ok())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let newer = latest
            .as_ref()
            .map(|(time, _)| modified > *time)
            .unwrap_or(true);
        if newer {
            latest = Some((modified, entry.into_path()));
        }
    }

    latest
        .map(|(_, path)| path)
        .ok_or_else(|| DiscoverError::NotFound(dir.to_path_buf()))
}
