//! Settings domain types and validation.
//!
//! `Settings` is the typed replacement for the flat option map the downloader
//! front-end persists. Every field read by the command builder has a default,
//! and `#[serde(default)]` means a partial or older settings file is merged
//! over the defaults instead of failing to load.

mod error;
mod store;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::finish::FinishAction;

pub use error::SettingsError;
pub use store::{CONFIG_DIR_ENV, SettingsStore, default_settings_path};

/// Version of the default set below. Bumped when defaults change meaning.
pub const SETTINGS_VERSION: u32 = 1;

/// Default yt-dlp output template.
pub const DEFAULT_OUTPUT_TEMPLATE: &str = "%(title)s [%(id)s].%(ext)s";

/// Value used by the preference options to mean "no preference".
pub const NO_PREFERENCE: &str = "none";

/// Upper bound for `queue_max_concurrent`.
pub const MAX_CONCURRENT_LIMIT: u32 = 16;

/// How chapters in the source media are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChapterMode {
    /// Leave chapters alone.
    #[default]
    Ignore,
    /// Embed chapter markers into the output file.
    Embedded,
    /// Split the output into one file per chapter.
    Split,
}

/// Unit of the download rate limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateUnit {
    #[serde(rename = "KB/s")]
    KilobytesPerSecond,
    #[default]
    #[serde(rename = "MB/s")]
    MegabytesPerSecond,
    /// Any unit the tool has no suffix for; the raw value is passed through.
    #[serde(rename = "B/s")]
    #[serde(other)]
    BytesPerSecond,
}

impl RateUnit {
    /// yt-dlp's suffix for this unit.
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::KilobytesPerSecond => "K",
            Self::MegabytesPerSecond => "M",
            Self::BytesPerSecond => "",
        }
    }
}

/// Application settings.
///
/// Created at startup from `Settings::default()` merged with the persisted
/// file, mutated by the front-end, and written back through
/// [`SettingsStore`] after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Version of the default set the file was written with.
    pub version: u32,

    // -- output ---------------------------------------------------------
    /// Directory downloads are written into.
    pub download_folder: PathBuf,
    /// yt-dlp output filename template, joined onto `download_folder`.
    pub output_template: String,

    // -- tools ----------------------------------------------------------
    /// Custom yt-dlp executable. Empty or missing on disk means "use PATH".
    pub ytdlp_path: String,
    /// ffmpeg location passed to yt-dlp. Ignored unless it exists on disk.
    pub ffmpeg_path: String,

    // -- format selection -------------------------------------------------
    /// Extract audio to mp3 instead of downloading video.
    pub audio_only: bool,
    /// Keep the downloaded container; when false the video is remuxed to mp4.
    pub keep_video: bool,
    /// Resolution ceiling such as `1080p`, or `none`.
    pub preferred_resolution: String,
    /// Fall back to any format above 30 fps when the main selector fails.
    pub prefer_higher_framerate: bool,
    pub preferred_video_container: String,
    pub preferred_audio_container: String,
    pub preferred_video_codec: String,
    pub preferred_audio_codec: String,

    // -- network ----------------------------------------------------------
    /// Numeric rate limit; empty means unlimited.
    pub rate_limit_value: String,
    pub rate_limit_unit: RateUnit,
    pub use_proxy: bool,
    pub proxy_url: String,
    /// Browser to read cookies from, or `none`.
    pub cookies_from_browser: String,
    /// Netscape cookie file. Takes precedence over `cookies_from_browser`.
    pub cookie_file_path: String,
    /// Ask yt-dlp to use the android client for YouTube.
    pub youtube_android_client: bool,

    // -- post-processing --------------------------------------------------
    pub embed_metadata: bool,
    pub embed_thumbnail: bool,
    pub embed_subtitles: bool,
    /// Leave file modification time at download time (`--no-mtime`).
    pub file_mod_write_time: bool,
    pub chapter_mode: ChapterMode,
    pub force_keyframes: bool,

    // -- SponsorBlock -----------------------------------------------------
    pub sponsorblock_enabled: bool,
    /// Categories to mark as chapters.
    pub sponsorblock_mark: Vec<String>,
    /// Categories to cut out.
    pub sponsorblock_remove: Vec<String>,

    /// Free-form extra arguments, tokenized with shell-word rules.
    pub custom_args: String,

    // -- queue ------------------------------------------------------------
    /// Number of tasks allowed to run at the same time.
    pub queue_max_concurrent: u32,
    /// Extra attempts for a task that exits non-zero.
    pub queue_retry: u32,
    /// Seconds to wait between attempts.
    pub queue_retry_sleep: u64,
    /// What to do once the queue drains.
    pub finish_action: FinishAction,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            download_folder: default_download_folder(),
            output_template: DEFAULT_OUTPUT_TEMPLATE.to_string(),
            ytdlp_path: String::new(),
            ffmpeg_path: String::new(),
            audio_only: false,
            keep_video: true,
            preferred_resolution: NO_PREFERENCE.to_string(),
            prefer_higher_framerate: false,
            preferred_video_container: NO_PREFERENCE.to_string(),
            preferred_audio_container: NO_PREFERENCE.to_string(),
            preferred_video_codec: NO_PREFERENCE.to_string(),
            preferred_audio_codec: NO_PREFERENCE.to_string(),
            rate_limit_value: String::new(),
            rate_limit_unit: RateUnit::default(),
            use_proxy: false,
            proxy_url: String::new(),
            cookies_from_browser: NO_PREFERENCE.to_string(),
            cookie_file_path: String::new(),
            youtube_android_client: false,
            embed_metadata: true,
            embed_thumbnail: false,
            embed_subtitles: false,
            file_mod_write_time: true,
            chapter_mode: ChapterMode::default(),
            force_keyframes: false,
            sponsorblock_enabled: false,
            sponsorblock_mark: Vec::new(),
            sponsorblock_remove: Vec::new(),
            custom_args: String::new(),
            queue_max_concurrent: 1,
            queue_retry: 2,
            queue_retry_sleep: 5,
            finish_action: FinishAction::default(),
        }
    }
}

/// `~/Downloads` (or the platform equivalent), falling back to a relative
/// `Downloads` directory when no home directory can be determined.
fn default_download_folder() -> PathBuf {
    dirs::download_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        .unwrap_or_else(|| PathBuf::from("Downloads"))
}

/// Interpret a preference option: `none` and blank values mean "unset".
pub fn preference(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(NO_PREFERENCE) {
        None
    } else {
        Some(value)
    }
}

/// Validate settings values.
///
/// The command builder tolerates anything; this is for the front-end to
/// reject obviously broken edits before they are persisted.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if !(1..=MAX_CONCURRENT_LIMIT).contains(&settings.queue_max_concurrent) {
        return Err(SettingsError::InvalidConcurrency(
            settings.queue_max_concurrent,
        ));
    }

    if settings.output_template.trim().is_empty() {
        return Err(SettingsError::EmptyOutputTemplate);
    }

    let rate = settings.rate_limit_value.trim();
    if !rate.is_empty() && rate.parse::<f64>().is_err() {
        return Err(SettingsError::InvalidRateLimit(rate.to_string()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.output_template, DEFAULT_OUTPUT_TEMPLATE);
        assert_eq!(settings.queue_max_concurrent, 1);
        assert_eq!(settings.queue_retry, 2);
        assert_eq!(settings.chapter_mode, ChapterMode::Ignore);
        assert_eq!(settings.rate_limit_unit, RateUnit::MegabytesPerSecond);
        assert!(settings.embed_metadata);
        assert!(!settings.embed_thumbnail);
        assert!(settings.keep_video);
    }

    #[test]
    fn test_partial_json_merges_over_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"audio_only": true, "rate_limit_unit": "KB/s"}"#).unwrap();
        assert!(settings.audio_only);
        assert_eq!(settings.rate_limit_unit, RateUnit::KilobytesPerSecond);
        assert_eq!(settings.output_template, DEFAULT_OUTPUT_TEMPLATE);
        assert_eq!(settings.queue_retry_sleep, 5);
    }

    #[test]
    fn test_unknown_rate_unit_has_no_suffix() {
        let settings: Settings =
            serde_json::from_str(r#"{"rate_limit_unit": "GB/s"}"#).unwrap();
        assert_eq!(settings.rate_limit_unit, RateUnit::BytesPerSecond);
        assert_eq!(settings.rate_limit_unit.suffix(), "");
    }

    #[test]
    fn test_chapter_mode_serialization() {
        let json = serde_json::to_string(&ChapterMode::Embedded).unwrap();
        assert_eq!(json, "\"embedded\"");
    }

    #[test]
    fn test_preference() {
        assert_eq!(preference("none"), None);
        assert_eq!(preference("  "), None);
        assert_eq!(preference("NONE"), None);
        assert_eq!(preference("mp4"), Some("mp4"));
    }

    #[test]
    fn test_validate_settings_valid() {
        assert!(validate_settings(&Settings::default()).is_ok());
    }

    #[test]
    fn test_validate_concurrency_out_of_range() {
        let settings = Settings {
            queue_max_concurrent: 0,
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidConcurrency(0))
        ));
    }

    #[test]
    fn test_validate_rate_limit() {
        let settings = Settings {
            rate_limit_value: "fast".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::InvalidRateLimit(_))
        ));
    }

    #[test]
    fn test_validate_empty_template() {
        let settings = Settings {
            output_template: " ".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::EmptyOutputTemplate)
        ));
    }
}
