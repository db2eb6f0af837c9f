//! Host platform detection.
//!
//! Several yt-dlp flags and the finish-action commands differ per operating
//! system. The platform is a plain value so callers (and tests) can ask for
//! another platform's behavior explicitly.

use serde::{Deserialize, Serialize};

/// Operating system family the command line is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    MacOs,
    Linux,
    Other,
}

impl Platform {
    /// The platform this binary was compiled for.
    pub const fn current() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(target_os = "linux") {
            Self::Linux
        } else {
            Self::Other
        }
    }

    pub const fn is_windows(self) -> bool {
        matches!(self, Self::Windows)
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_matches_compile_target() {
        assert_eq!(Platform::current().is_windows(), cfg!(windows));
        assert_eq!(Platform::default(), Platform::current());
    }
}
