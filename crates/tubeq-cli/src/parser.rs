//! Root CLI parser with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Queue yt-dlp downloads from the terminal.
#[derive(Parser)]
#[command(name = "tubeq")]
#[command(about = "Queue and run yt-dlp downloads")]
#[command(version)]
pub struct Cli {
    /// Settings file to use instead of the default location
    #[arg(long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parser_builds() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_args() {
        let cli = Cli::parse_from([
            "tubeq",
            "get",
            "https://example.com/v",
            "--verbose",
            "--config",
            "/tmp/tubeq.json",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/tubeq.json")));
    }

    #[test]
    fn test_no_command_is_allowed() {
        let cli = Cli::parse_from(["tubeq"]);
        assert!(cli.command.is_none());
    }
}
