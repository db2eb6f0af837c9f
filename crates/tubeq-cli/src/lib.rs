//! Command-line front-end for tubeq.
//!
//! `main.rs` is the composition root: it parses arguments, bootstraps the
//! settings store, and dispatches to a handler. Handlers build tasks with
//! `tubeq-core` and run them on the `tubeq-runtime` task runner.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary only
use anyhow as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod config_commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;

pub use bootstrap::{CliContext, bootstrap};
pub use commands::{Commands, DateFilterArg};
pub use config_commands::ConfigCommand;
pub use error::CliError;
pub use parser::Cli;
