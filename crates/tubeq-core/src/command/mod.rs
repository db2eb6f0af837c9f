//! yt-dlp command construction.
//!
//! Translates a [`Settings`](crate::Settings) snapshot, a target URL, and an
//! optional preset argument list into the exact argv handed to the child
//! process. Construction never fails: a missing or invalid path option simply
//! omits its flag, and the URL is passed through unvalidated for yt-dlp to
//! judge.

mod args;
mod builder;
mod format;

pub use args::{remove_flag_with_value, split_custom_args};
pub use builder::{CommandBuilder, build_command};
pub use format::format_selector;

/// Executable name used when no custom yt-dlp path is configured.
pub const DEFAULT_YTDLP_EXECUTABLE: &str = "yt-dlp";
