//! Argv builder for yt-dlp downloads.

use std::path::Path;

use crate::platform::Platform;
use crate::settings::{ChapterMode, Settings, preference};

use super::DEFAULT_YTDLP_EXECUTABLE;
use super::args::{remove_flag_with_value, split_custom_args};
use super::format::format_selector;

/// Build the download argv for `url` on the current platform.
///
/// With `preset` set, its arguments are used verbatim in place of the derived
/// format flags, any output flag inside it is replaced by the configured
/// output path, and `custom_args` is not applied.
pub fn build_command(settings: &Settings, url: &str, preset: Option<&[String]>) -> Vec<String> {
    CommandBuilder::new(settings).build(url, preset)
}

/// Stateless builder over a borrowed settings snapshot.
///
/// The only inputs besides the settings are the target platform (for
/// platform-specific flags) and file-existence checks on configured paths.
#[derive(Debug, Clone, Copy)]
pub struct CommandBuilder<'a> {
    settings: &'a Settings,
    platform: Platform,
}

impl<'a> CommandBuilder<'a> {
    pub const fn new(settings: &'a Settings) -> Self {
        Self {
            settings,
            platform: Platform::current(),
        }
    }

    /// Build for another platform than the running one.
    #[must_use]
    pub const fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The executable: the configured yt-dlp path when it exists, otherwise
    /// the bare name for the OS search path to resolve.
    pub fn executable(&self) -> String {
        existing_path(&self.settings.ytdlp_path)
            .map_or_else(|| DEFAULT_YTDLP_EXECUTABLE.to_string(), str::to_string)
    }

    /// The output path: download folder joined with the output template.
    pub fn output_path(&self) -> String {
        self.settings
            .download_folder
            .join(&self.settings.output_template)
            .to_string_lossy()
            .into_owned()
    }

    pub fn build(&self, url: &str, preset: Option<&[String]>) -> Vec<String> {
        let s = self.settings;
        // An empty preset is an ordinary download
        let preset = preset.filter(|p| !p.is_empty());
        let mut cmd = vec![self.executable(), url.to_string()];

        match preset {
            Some(preset) => {
                let mut preset = preset.to_vec();
                // The configured output path always wins over the preset's.
                if !remove_flag_with_value(&mut preset, "-o") {
                    remove_flag_with_value(&mut preset, "--output");
                }
                cmd.extend(preset);
            }
            None => self.push_format_flags(&mut cmd),
        }

        cmd.push("-o".to_string());
        cmd.push(self.output_path());

        if self.platform.is_windows() {
            cmd.push("--windows-filenames".to_string());
        }

        let rate = s.rate_limit_value.trim();
        if !rate.is_empty() {
            cmd.push("--limit-rate".to_string());
            cmd.push(format!("{rate}{}", s.rate_limit_unit.suffix()));
        }

        if s.embed_metadata {
            cmd.push("--embed-metadata".to_string());
        }
        if s.embed_thumbnail {
            cmd.push("--embed-thumbnail".to_string());
        }
        if s.embed_subtitles {
            cmd.push("--embed-subs".to_string());
        }

        cmd.push(
            if s.file_mod_write_time {
                "--no-mtime"
            } else {
                "--write-last-modified-time"
            }
            .to_string(),
        );

        match s.chapter_mode {
            ChapterMode::Ignore => {}
            ChapterMode::Embedded => cmd.push("--embed-chapters".to_string()),
            ChapterMode::Split => cmd.push("--split-chapters".to_string()),
        }

        if s.force_keyframes {
            cmd.push("--force-keyframes-at-cuts".to_string());
        }

        if s.youtube_android_client {
            cmd.push("--youtube-client".to_string());
            cmd.push("android".to_string());
        }

        let proxy = s.proxy_url.trim();
        if s.use_proxy && !proxy.is_empty() {
            cmd.push("--proxy".to_string());
            cmd.push(proxy.to_string());
        }

        self.push_cookie_flags(&mut cmd);
        self.push_sponsorblock_flags(&mut cmd);

        if let Some(ffmpeg) = existing_path(&s.ffmpeg_path) {
            cmd.push("--ffmpeg-location".to_string());
            cmd.push(ffmpeg.to_string());
        }

        if preset.is_none() {
            cmd.extend(split_custom_args(&s.custom_args));
        }

        cmd
    }

    /// Format selection for regular (non-preset) downloads.
    fn push_format_flags(&self, cmd: &mut Vec<String>) {
        if self.settings.audio_only {
            cmd.extend(["-x", "--audio-format", "mp3"].map(String::from));
            return;
        }

        cmd.push("-f".to_string());
        cmd.push(format_selector(self.settings));

        if !self.settings.keep_video {
            cmd.push("--remux-video".to_string());
            cmd.push("mp4".to_string());
        }
    }

    /// At most one cookie source: an existing cookie file beats a browser.
    fn push_cookie_flags(&self, cmd: &mut Vec<String>) {
        if let Some(file) = existing_path(&self.settings.cookie_file_path) {
            cmd.push("--cookies".to_string());
            cmd.push(file.to_string());
        } else if let Some(browser) = preference(&self.settings.cookies_from_browser) {
            cmd.push("--cookies-from-browser".to_string());
            cmd.push(browser.to_string());
        }
    }

    fn push_sponsorblock_flags(&self, cmd: &mut Vec<String>) {
        let s = self.settings;
        if !s.sponsorblock_enabled {
            return;
        }

        if !s.sponsorblock_mark.is_empty() {
            cmd.push("--sponsorblock-mark".to_string());
            cmd.push(s.sponsorblock_mark.join(","));
        }
        if !s.sponsorblock_remove.is_empty() {
            cmd.push("--sponsorblock-remove".to_string());
            cmd.push(s.sponsorblock_remove.join(","));
        }
    }
}

/// A configured path, trimmed, if it is non-empty and exists on disk.
fn existing_path(raw: &str) -> Option<&str> {
    let raw = raw.trim();
    (!raw.is_empty() && Path::new(raw).exists()).then_some(raw)
}
