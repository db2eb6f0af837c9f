//! Preset catalogs and preset argument preparation.
//!
//! A preset is a named, fixed list of yt-dlp flags used instead of the flags
//! derived from settings. The catalog contents are opaque data loaded from a
//! JSON object (`{"name": ["--flag", "value", ...]}`); file order is kept.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Days, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::command::remove_flag_with_value;

/// Errors from loading or querying a preset catalog.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Failed to read preset catalog {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Invalid preset catalog: {0}")]
    Parse(String),

    #[error("Unknown preset '{0}'")]
    Unknown(String),
}

/// Ordered set of named presets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PresetCatalog {
    presets: IndexMap<String, Vec<String>>,
}

impl PresetCatalog {
    pub fn from_json(json: &str) -> Result<Self, PresetError> {
        serde_json::from_str(json).map_err(|e| PresetError::Parse(e.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self, PresetError> {
        let json = fs::read_to_string(path).map_err(|e| PresetError::Read {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    /// Preset names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// A copy of the named preset's arguments.
    pub fn args(&self, name: &str) -> Result<Vec<String>, PresetError> {
        self.presets
            .get(name)
            .cloned()
            .ok_or_else(|| PresetError::Unknown(name.to_string()))
    }

    pub fn insert(&mut self, name: impl Into<String>, args: Vec<String>) {
        self.presets.insert(name.into(), args);
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

/// Restrict a preset run to recently uploaded media.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    None,
    /// Last 24 hours.
    Day,
    Week,
    Month,
    Year,
}

impl DateFilter {
    /// Window length in days.
    pub const fn days(self) -> Option<u64> {
        match self {
            Self::None => None,
            Self::Day => Some(1),
            Self::Week => Some(7),
            Self::Month => Some(30),
            Self::Year => Some(365),
        }
    }

    /// Value for `--dateafter`, relative to `today`.
    pub fn date_after(self, today: NaiveDate) -> Option<String> {
        let days = self.days()?;
        today
            .checked_sub_days(Days::new(days))
            .map(|date| date.format("%Y%m%d").to_string())
    }
}

/// Per-run tweaks applied to a preset before it is handed to the builder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetOptions {
    /// Also download comments (`--write-comments`).
    pub write_comments: bool,
    pub date_filter: DateFilter,
}

/// Prepare a preset's arguments for queueing individual URLs.
///
/// The preset's own `--batch-file` pair is dropped (URLs are queued one by
/// one instead), then the options are appended. `today` is passed in so the
/// only time-derived value is explicit.
pub fn prepare_preset_args(
    mut base: Vec<String>,
    options: PresetOptions,
    today: NaiveDate,
) -> Vec<String> {
    remove_flag_with_value(&mut base, "--batch-file");

    if options.write_comments {
        base.push("--write-comments".to_string());
    }

    if let Some(date) = options.date_filter.date_after(today) {
        base.push("--dateafter".to_string());
        base.push(date);
    }

    base
}
