//! CLI error type and exit code mapping.

use thiserror::Error;
use tubeq_core::{PresetError, SettingsError, SourceError};
use tubeq_runtime::ProbeError;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or inconsistent command-line input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// A child process could not be run.
    #[error("Process error: {0}")]
    Process(String),

    /// The queue drained with failed or never-started tasks.
    #[error("{failed} task(s) failed, {skipped} not run")]
    Tasks { failed: usize, skipped: usize },
}

impl CliError {
    /// Exit code following sysexits.h where a category fits.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Tasks { .. } => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Process(_) => 71,  // EX_OSERR
            Self::Io(_) => 74,       // EX_IOERR
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<PresetError> for CliError {
    fn from(err: PresetError) -> Self {
        match err {
            PresetError::Unknown(_) => Self::Arguments(err.to_string()),
            PresetError::Read { .. } => Self::Io(err.to_string()),
            PresetError::Parse(_) => Self::Config(err.to_string()),
        }
    }
}

impl From<SourceError> for CliError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::Read { .. } => Self::Io(err.to_string()),
            SourceError::Empty(_) => Self::Arguments(err.to_string()),
        }
    }
}

impl From<ProbeError> for CliError {
    fn from(err: ProbeError) -> Self {
        Self::Process(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Tasks { failed: 1, skipped: 0 }.exit_code(), 1);
        assert_eq!(CliError::Arguments(String::new()).exit_code(), 2);
        assert_eq!(CliError::Config(String::new()).exit_code(), 78);
    }

    #[test]
    fn test_source_errors_map_by_kind() {
        let empty = CliError::from(SourceError::Empty(PathBuf::from("urls.txt")));
        assert!(matches!(empty, CliError::Arguments(_)));

        let unknown = CliError::from(PresetError::Unknown("nope".to_string()));
        assert!(matches!(unknown, CliError::Arguments(msg) if msg.contains("nope")));
    }
}
