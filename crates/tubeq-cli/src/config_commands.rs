//! `tubeq config` subcommands.

use clap::Subcommand;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Print the settings file location
    Path,
    /// Print the current settings as JSON
    Show,
    /// Restore every setting to its default
    Reset,
}
