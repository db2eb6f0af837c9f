//! Text markers interleaved with child output on the log stream.
//!
//! Every marker is a single line ending in `\n`, so a consumer can treat the
//! log stream as plain text.

use tubeq_core::{Task, TaskStatus};

pub fn queued(label: &str) -> String {
    format!("[QUEUE] {label}\n")
}

pub fn started(label: &str) -> String {
    format!("[RUN] {label}\n")
}

pub fn error(message: impl std::fmt::Display) -> String {
    format!("[ERROR] {message}\n")
}

pub fn retry(label: &str, attempt: u32, total: u32, code: i32) -> String {
    format!("[RETRY] {label} (attempt {attempt}/{total}, code={code})\n")
}

pub fn ended(task: &Task) -> String {
    let code = task
        .exit_code()
        .map_or_else(|| "none".to_string(), |c| c.to_string());
    let status = task.status();
    debug_assert!(matches!(status, TaskStatus::Done | TaskStatus::Error));
    format!("[END] {} (status={status}, code={code})\n", task.label)
}
