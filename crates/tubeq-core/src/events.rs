//! Runner notifications.
//!
//! The runner publishes everything it has to say through a single ordered
//! stream of these events. Consumers pick their own dispatch (UI thread,
//! terminal, SSE, ...); the runner makes no thread-affinity assumptions.

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// One outbound notification from the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum RunnerEvent {
    /// One line of child output (with its newline) or one lifecycle marker.
    Log(String),
    /// Task snapshot, sent on entering `running` and on reaching a terminal
    /// status.
    Task(Task),
}

impl RunnerEvent {
    pub fn as_log(&self) -> Option<&str> {
        match self {
            Self::Log(line) => Some(line),
            Self::Task(_) => None,
        }
    }

    pub const fn as_task(&self) -> Option<&Task> {
        match self {
            Self::Task(task) => Some(task),
            Self::Log(_) => None,
        }
    }
}
