//! Task value type.
//!
//! A `Task` is one queued invocation of the external downloader. It is
//! created by the caller, handed to the runner by value, and only mutated
//! by the runner's worker while in flight. Observers receive snapshots.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Exit code recorded when the process could not be spawned, could not be
/// read from, or terminated without reporting a code.
pub const SENTINEL_EXIT_CODE: i32 = -1;

/// Opaque caller-assigned task identity (e.g. a UI row id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TaskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Task lifecycle status.
///
/// Transitions are one-directional: `Queued → Running → {Done, Error}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Queued,
    Running,
    /// Exited with code 0.
    Done,
    /// Non-zero exit, forced termination, or spawn/stream failure.
    Error,
}

impl TaskStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Error)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Done => "done",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One job for the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Caller-assigned identity, correlated 1:1 with a queue entry.
    pub id: TaskId,
    /// Human-readable label used in log markers.
    pub label: String,
    /// Full argv; element 0 is the executable.
    pub command: Vec<String>,
    /// Working directory for the child; inherits the runner's when `None`.
    pub working_dir: Option<PathBuf>,
    status: TaskStatus,
    exit_code: Option<i32>,
}

impl Task {
    /// Create a queued task.
    pub fn new(id: impl Into<TaskId>, label: impl Into<String>, command: Vec<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            command,
            working_dir: None,
            status: TaskStatus::Queued,
            exit_code: None,
        }
    }

    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Exit code, present only once the status is terminal.
    pub const fn exit_code(&self) -> Option<i32> {
        self.exit_code
    }

    /// The executable (argv\[0\]), if the command is non-empty.
    pub fn program(&self) -> Option<&str> {
        self.command.first().map(String::as_str)
    }

    /// Arguments after the executable.
    pub fn args(&self) -> &[String] {
        self.command.get(1..).unwrap_or_default()
    }

    /// `→ Running`. Runner only.
    pub fn mark_running(&mut self) {
        self.status = TaskStatus::Running;
        self.exit_code = None;
    }

    /// Record the exit code and derive the terminal status from it. Runner only.
    pub fn finish(&mut self, code: i32) {
        self.exit_code = Some(code);
        self.status = if code == 0 {
            TaskStatus::Done
        } else {
            TaskStatus::Error
        };
    }

    /// Back to `Queued` with no exit code, whatever state the task was in.
    ///
    /// The runner applies this on enqueue, so a reused or deserialized task
    /// always starts from a clean snapshot.
    pub fn reset(&mut self) {
        self.status = TaskStatus::Queued;
        self.exit_code = None;
    }

    /// Terminal failure without a real exit code. Runner only.
    pub fn fail(&mut self) {
        self.finish(SENTINEL_EXIT_CODE);
    }
}
