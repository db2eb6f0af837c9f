//! Settings error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while validating, loading, or persisting settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Max concurrent downloads must be between 1 and 16, got {0}")]
    InvalidConcurrency(u32),

    #[error("Output template cannot be empty")]
    EmptyOutputTemplate,

    #[error("Rate limit must be a number, got '{0}'")]
    InvalidRateLimit(String),

    /// Could not determine the system configuration directory.
    #[error("Cannot determine configuration directory")]
    NoConfigDir,

    /// The settings file exists but could not be parsed.
    #[error("Settings file {path} is corrupted: {reason}")]
    Parse { path: PathBuf, reason: String },

    /// Reading or writing the settings file failed.
    #[error("Failed to access settings file {path}: {reason}")]
    Io { path: PathBuf, reason: String },
}

impl SettingsError {
    pub(crate) fn io(path: impl Into<PathBuf>, err: &impl std::fmt::Display) -> Self {
        Self::Io {
            path: path.into(),
            reason: err.to_string(),
        }
    }
}
