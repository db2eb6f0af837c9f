//! Single-item metadata probe via `yt-dlp --dump-json`.

use std::io;
use std::process::Stdio;

use thiserror::Error;
use tracing::debug;
use tubeq_core::{MediaInfo, Settings, Task, probe_command};

use crate::process::task_command;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to run yt-dlp: {0}")]
    Spawn(#[from] io::Error),

    #[error("yt-dlp returned no metadata: {stderr}")]
    NoData { stderr: String },
}

/// Fetch metadata for `url` without downloading it.
///
/// Non-JSON lines on stdout are skipped. An empty result is only an error
/// when yt-dlp also wrote something to stderr.
pub async fn probe_media(settings: &Settings, url: &str) -> Result<Vec<MediaInfo>, ProbeError> {
    let task = Task::new("probe", url, probe_command(settings, url));
    debug!(url, "Probing media metadata");

    // stdout carries the JSON, stderr the diagnostics; keep them apart
    let output = task_command(&task)?
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;
    let entries = parse_dump_json(&String::from_utf8_lossy(&output.stdout));

    let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
    if entries.is_empty() && !stderr.is_empty() {
        return Err(ProbeError::NoData { stderr });
    }
    Ok(entries)
}

fn parse_dump_json(stdout: &str) -> Vec<MediaInfo> {
    stdout.lines().filter_map(MediaInfo::from_json_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_entry_per_json_line() {
        let stdout = concat!(
            "[youtube] Extracting URL\n",
            r#"{"title": "A", "ext": "mp4"}"#,
            "\n",
            r#"{"title": "B", "format_note": "720p"}"#,
            "\n"
        );
        let entries = parse_dump_json(stdout);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title.as_deref(), Some("A"));
        assert_eq!(entries[1].note(), Some("720p"));
    }

    /// Probe a shell script through `sh`, which receives it as the "URL".
    #[cfg(unix)]
    async fn probe_script(body: &str) -> Result<Vec<MediaInfo>, ProbeError> {
        let dir = tempfile::TempDir::new().unwrap();
        let script = dir.path().join("fake-ytdlp.sh");
        std::fs::write(&script, body).unwrap();
        let settings = Settings {
            ytdlp_path: "/bin/sh".to_string(),
            ..Settings::default()
        };
        probe_media(&settings, &script.to_string_lossy()).await
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn probe_reads_stdout_entries() {
        let entries = probe_script(
            r#"echo "[generic] extracting"; echo '{"title": "Clip", "webpage_url": "https://v/1"}'"#,
        )
        .await
        .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].webpage_url.as_deref(), Some("https://v/1"));
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn stderr_without_entries_is_no_data() {
        let err = probe_script("echo 'ERROR: Unsupported URL' >&2; exit 1")
            .await
            .unwrap_err();
        assert!(matches!(err, ProbeError::NoData { ref stderr } if stderr.contains("Unsupported")));
    }
}
