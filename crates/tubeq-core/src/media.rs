//! Media metadata reported by `yt-dlp --dump-json`.

use serde::{Deserialize, Serialize};

use crate::command::CommandBuilder;
use crate::settings::Settings;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;

/// The subset of yt-dlp's info JSON the queue displays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaInfo {
    pub title: Option<String>,
    pub webpage_url: Option<String>,
    pub format_id: Option<String>,
    pub format_note: Option<String>,
    pub resolution: Option<String>,
    pub ext: Option<String>,
    pub filesize_approx: Option<f64>,
}

impl MediaInfo {
    /// Parse one line of `--dump-json` output. Non-JSON lines yield `None`.
    pub fn from_json_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('{') {
            return None;
        }
        serde_json::from_str(line).ok()
    }

    /// Format note, falling back to the resolution.
    pub fn note(&self) -> Option<&str> {
        self.format_note
            .as_deref()
            .or(self.resolution.as_deref())
    }

    /// Approximate size for display: `~1.50 GB`, `~12.00 MB`, `~3.00 KB`.
    pub fn display_size(&self) -> Option<String> {
        let size = self.filesize_approx.filter(|s| *s > 0.0)?;
        Some(if size > GIB {
            format!("~{:.2} GB", size / GIB)
        } else if size > MIB {
            format!("~{:.2} MB", size / MIB)
        } else {
            format!("~{:.2} KB", size / KIB)
        })
    }
}

/// Argv for a single-item metadata probe of `url`.
pub fn probe_command(settings: &Settings, url: &str) -> Vec<String> {
    let mut cmd = vec![CommandBuilder::new(settings).executable(), url.to_string()];
    cmd.extend(["--dump-json", "--no-warnings", "--no-playlist"].map(String::from));
    cmd
}
