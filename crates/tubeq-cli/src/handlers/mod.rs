//! Command handlers.
//!
//! Each handler turns parsed arguments into core calls and prints the
//! result. Download handlers build tasks and hand them to [`queue::run`].

pub mod check_deps;
pub mod command;
pub mod config;
pub mod get;
pub mod preset;
pub mod probe;
pub mod queue;

use tubeq_core::Task;
use uuid::Uuid;

/// A task with a fresh unique id, labelled by its URL.
pub(crate) fn new_task(url: &str, command: Vec<String>) -> Task {
    Task::new(Uuid::new_v4().to_string(), url, command)
}
