//! Subcommands of the `tubeq` binary.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use tubeq_core::DateFilter;

use crate::config_commands::ConfigCommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Download one or more URLs using the configured settings
    Get {
        /// Media URLs, queued in the order given
        #[arg(required = true)]
        urls: Vec<String>,
        #[command(flatten)]
        finish: FinishArgs,
    },

    /// Run a named preset over a batch of URLs
    Preset {
        /// Preset name from the catalog
        name: String,
        /// JSON file mapping preset names to yt-dlp arguments
        #[arg(long)]
        catalog: PathBuf,
        /// Text file with one URL per line
        #[arg(long, conflicts_with = "archive_dir", required_unless_present = "archive_dir")]
        batch: Option<PathBuf>,
        /// Directory of downloaded files to re-check by video id
        #[arg(long)]
        archive_dir: Option<PathBuf>,
        /// Also download comments
        #[arg(long)]
        comments: bool,
        /// Only media uploaded within this window
        #[arg(long, value_enum)]
        date_filter: Option<DateFilterArg>,
        #[command(flatten)]
        finish: FinishArgs,
    },

    /// Print the yt-dlp command line that would be run for a URL
    Command {
        url: String,
        /// Preset name (requires --catalog)
        #[arg(long, requires = "catalog")]
        preset: Option<String>,
        /// JSON preset catalog
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Show metadata for a URL without downloading
    Probe { url: String },

    /// Report where yt-dlp and ffmpeg will be found
    CheckDeps,

    /// Inspect or reset settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Options for what happens once a queue drains.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct FinishArgs {
    /// Execute the configured finish action (shutdown, sleep, ...) instead of
    /// only reporting it
    #[arg(long)]
    pub run_finish_action: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilterArg {
    Day,
    Week,
    Month,
    Year,
}

impl From<DateFilterArg> for DateFilter {
    fn from(arg: DateFilterArg) -> Self {
        match arg {
            DateFilterArg::Day => Self::Day,
            DateFilterArg::Week => Self::Week,
            DateFilterArg::Month => Self::Month,
            DateFilterArg::Year => Self::Year,
        }
    }
}
