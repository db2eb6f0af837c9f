//! Runtime for tubeq: the background task runner plus the child-process
//! helpers it is built on.
//!
//! - `runner` - FIFO task queue executed by a worker pool
//! - `process` - spawning, merged output streaming, graceful stop
//! - `probe` - `yt-dlp --dump-json` metadata lookup
//! - `deps` - locating yt-dlp and ffmpeg

#![deny(unsafe_code)]

pub mod deps;
pub mod probe;
pub mod process;
pub mod runner;

pub use deps::{detect_dependencies, locate_tool};
pub use probe::{ProbeError, probe_media};
pub use runner::{RunnerConfig, TaskRunner};
