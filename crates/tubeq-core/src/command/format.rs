//! Format selector derivation.
//!
//! Builds a yt-dlp format selector from the preference options: codec and
//! container constraints become bracketed filters on the video (`bv`) and
//! audio (`ba`) branches, the resolution ceiling becomes `[height<=N]`, and
//! the higher-framerate preference adds a whole-expression fallback.

use std::fmt::Write;

use crate::settings::{Settings, preference};

/// Fallback alternative used when `prefer_higher_framerate` is set.
const HIGH_FRAMERATE_FALLBACK: &str = "/b[fps>30]";

/// Build the `-f` value for a non-audio-only download.
pub fn format_selector(settings: &Settings) -> String {
    let mut fmt = String::from("bv");

    if let Some(codec) = preference(&settings.preferred_video_codec) {
        let _ = write!(fmt, "[vcodec~={codec}]");
    }
    if let Some(container) = preference(&settings.preferred_video_container) {
        let _ = write!(fmt, "[ext={container}]");
    }

    fmt.push_str("+ba");

    if let Some(codec) = preference(&settings.preferred_audio_codec) {
        let _ = write!(fmt, "[acodec~={codec}]");
    }
    if let Some(container) = preference(&settings.preferred_audio_container) {
        let _ = write!(fmt, "[ext={container}]");
    }
    if let Some(height) = preference(&settings.preferred_resolution).map(resolution_height) {
        let _ = write!(fmt, "[height<={height}]");
    }

    if settings.prefer_higher_framerate {
        fmt.push_str(HIGH_FRAMERATE_FALLBACK);
    }

    fmt
}

/// `1080p` → `1080`. Values without a unit suffix pass through unchanged.
fn resolution_height(resolution: &str) -> &str {
    resolution
        .strip_suffix(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(resolution)
}
