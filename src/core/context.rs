//! Run context: which piano and keyboard section a probe file belongs to
//!
//! Probe folders and files are named `{Make}_{Serial}_{Section}`, e.g.
//! `Steinway_123456_Upper.csv`.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Keyboard half probed in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Upper,
    Lower,
    Unknown,
}

impl Section {
    /// Section named by an identifier suffix (`_Upper` / `_Lower`)
    pub fn from_suffix(id: &str) -> Option<Self> {
        if id.ends_with("_Upper") {
            Some(Section::Upper)
        } else if id.ends_with("_Lower") {
            Some(Section::Lower)
        } else {
            None
        }
    }

    /// Section named anywhere in a path (`_Upper` / `_Lower`)
    pub fn from_path(path: &Path) -> Option<Self> {
        let text = path.to_string_lossy();
        if text.contains("_Upper") {
            Some(Section::Upper)
        } else if text.contains("_Lower") {
            Some(Section::Lower)
        } else {
            None
        }
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Upper => write!(f, "Upper"),
            Section::Lower => write!(f, "Lower"),
            Section::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Identity of one fitting run, passed explicitly through the pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    pub piano_id: String,
    pub section: Section,
}

impl RunContext {
    pub fn new(piano_id: impl Into<String>, section: Section) -> Self {
        Self {
            piano_id: piano_id.into(),
            section,
        }
    }

    /// Derive the context from a probe file path
    ///
    /// The piano id defaults to the file stem. The section comes from the id
    /// suffix, falling back to the full path.
    pub fn from_probe_path(path: &Path, piano_id: Option<&str>) -> Self {
        let piano_id = piano_id
            .map(str::to_string)
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Unknown".to_string());

        let section = Section::from_suffix(&piano_id)
            .or_else(|| Section::from_path(path))
            .unwrap_or(Section::Unknown);

        Self { piano_id, section }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new("Unknown", Section::Unknown)
    }
}
