//! Locating yt-dlp and ffmpeg.

use std::path::{Path, PathBuf};

use tracing::info;
use tubeq_core::{Platform, Settings};

pub const YTDLP_BINARY: &str = "yt-dlp";
pub const FFMPEG_BINARY: &str = "ffmpeg";

/// File name of `tool` on `platform` (`ffmpeg` → `ffmpeg.exe` on Windows).
pub fn binary_name(tool: &str, platform: Platform) -> String {
    if platform.is_windows() {
        format!("{tool}.exe")
    } else {
        tool.to_string()
    }
}

/// Full path of `name` on the search path, if any.
pub fn locate_tool(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Point unset or stale tool paths at binaries bundled in `base_dir`.
///
/// `ytdlp_path` receives the executable itself, `ffmpeg_path` the directory
/// holding ffmpeg (what `--ffmpeg-location` expects). Paths that already
/// exist are left alone. Returns whether `settings` changed.
pub fn detect_dependencies(settings: &mut Settings, base_dir: &Path) -> bool {
    let platform = Platform::current();
    let mut changed = false;

    if !is_existing(&settings.ytdlp_path) {
        let bundled = base_dir.join(binary_name(YTDLP_BINARY, platform));
        if bundled.is_file() {
            info!(path = %bundled.display(), "Using bundled yt-dlp");
            settings.ytdlp_path = bundled.to_string_lossy().into_owned();
            changed = true;
        }
    }

    if !is_existing(&settings.ffmpeg_path)
        && base_dir.join(binary_name(FFMPEG_BINARY, platform)).is_file()
    {
        info!(path = %base_dir.display(), "Using bundled ffmpeg");
        settings.ffmpeg_path = base_dir.to_string_lossy().into_owned();
        changed = true;
    }

    changed
}

fn is_existing(raw: &str) -> bool {
    let raw = raw.trim();
    !raw.is_empty() && Path::new(raw).exists()
}
