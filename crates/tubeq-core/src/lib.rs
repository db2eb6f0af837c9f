//! Core domain types for tubeq.
//!
//! - `settings` - typed settings with defaults and atomic persistence
//! - `command` - settings + URL (+ preset) → yt-dlp argv
//! - `task` / `events` - the task value type and runner notifications
//! - `preset` / `sources` - preset catalogs and batch URL sources
//! - `media` / `finish` / `platform` - supporting value types

#![deny(unused_crate_dependencies)]

pub mod command;
pub mod events;
pub mod finish;
pub mod media;
pub mod platform;
pub mod preset;
pub mod settings;
pub mod sources;
pub mod task;

// Re-export commonly used types for convenience
pub use command::{CommandBuilder, DEFAULT_YTDLP_EXECUTABLE, build_command, format_selector};
pub use events::RunnerEvent;
pub use finish::FinishAction;
pub use media::{MediaInfo, probe_command};
pub use platform::Platform;
pub use preset::{DateFilter, PresetCatalog, PresetError, PresetOptions, prepare_preset_args};
pub use settings::{
    ChapterMode, RateUnit, Settings, SettingsError, SettingsStore, default_settings_path,
    validate_settings,
};
pub use sources::{SourceError, urls_from_archive_dir, urls_from_batch_file};
pub use task::{SENTINEL_EXIT_CODE, Task, TaskId, TaskStatus};
