//! Worker loop: take the next task, run it to completion, report.

use std::io;
use std::process::ExitStatus;
use std::sync::Arc;

use tokio::process::Child;
use tracing::{debug, warn};
use tubeq_core::{SENTINEL_EXIT_CODE, Task};

use super::{Shared, markers};
use crate::process::{MergedOutput, SpawnedTask, spawn_task, stop_child};

pub(super) async fn run(index: usize, shared: Arc<Shared>) {
    debug!(worker = index, "Worker started");
    while let Some(mut task) = next_task(&shared).await {
        run_task(&mut task, &shared).await;
    }
    debug!(worker = index, "Worker exiting");
}

/// Wait for the next queued task and mark it running.
///
/// The queue lock is held until the `[RUN]` marker is out, so start markers
/// follow queue order even with several workers.
async fn next_task(shared: &Shared) -> Option<Task> {
    let mut queue = tokio::select! {
        biased;
        () = shared.cancel.cancelled() => return None,
        queue = shared.queue.lock() => queue,
    };
    let mut task = tokio::select! {
        biased;
        () = shared.cancel.cancelled() => return None,
        task = queue.recv() => task?,
    };

    task.mark_running();
    shared.events.task(&task);
    shared.events.log(markers::started(&task.label));
    Some(task)
}

/// Run every attempt of `task` and publish its terminal state.
async fn run_task(task: &mut Task, shared: &Shared) {
    let total = shared.config.retries.saturating_add(1);
    let mut attempt = 1;

    loop {
        debug!(task_id = %task.id, attempt, "Running task");
        match run_attempt(task, shared).await {
            Ok(code) if code != 0 && attempt < total && !shared.cancel.is_cancelled() => {
                warn!(task_id = %task.id, code, attempt, "Task failed, retrying");
                attempt += 1;
                shared
                    .events
                    .log(markers::retry(&task.label, attempt, total, code));
                if !pause_before_retry(shared).await {
                    task.finish(code);
                    break;
                }
            }
            Ok(code) => {
                task.finish(code);
                break;
            }
            Err(e) => {
                warn!(task_id = %task.id, error = %e, "Task could not run");
                shared.events.log(markers::error(&e));
                task.fail();
                break;
            }
        }
    }

    debug!(task_id = %task.id, status = %task.status(), code = ?task.exit_code(), "Task finished");
    shared.events.task(task);
    shared.events.log(markers::ended(task));
}

/// Sleep between attempts. Returns `false` if the runner was stopped.
async fn pause_before_retry(shared: &Shared) -> bool {
    tokio::select! {
        biased;
        () = shared.cancel.cancelled() => false,
        () = tokio::time::sleep(shared.config.retry_delay) => true,
    }
}

/// Run one attempt and return its exit code.
///
/// A stop request is not an error: the child is asked to terminate and the
/// code it exits with is reported like any other.
async fn run_attempt(task: &Task, shared: &Shared) -> io::Result<i32> {
    let SpawnedTask { mut child, mut output } = spawn_task(task).map_err(|e| {
        io::Error::new(
            e.kind(),
            format!("failed to start '{}': {e}", task.program().unwrap_or_default()),
        )
    })?;

    match forward_output(&mut output, shared).await {
        Ok(true) => {}
        Ok(false) => return Ok(stop(&mut child, shared).await),
        Err(e) => {
            let _ = child.start_kill();
            let _ = child.wait().await;
            return Err(e);
        }
    }

    let status = tokio::select! {
        biased;
        () = shared.cancel.cancelled() => return Ok(stop(&mut child, shared).await),
        status = child.wait() => status?,
    };
    Ok(exit_code(status))
}

/// Forward output lines until the pipe closes.
///
/// Returns `false` if the runner was stopped first; the rest of the output is
/// discarded.
async fn forward_output(output: &mut MergedOutput, shared: &Shared) -> io::Result<bool> {
    loop {
        tokio::select! {
            biased;
            () = shared.cancel.cancelled() => return Ok(false),
            line = output.next_line() => match line? {
                Some(line) => shared.events.log(line),
                None => return Ok(true),
            },
        }
    }
}

/// Terminate the child and return the code it exited with.
async fn stop(child: &mut Child, shared: &Shared) -> i32 {
    match stop_child(child, shared.config.stop_grace).await {
        Ok(status) => exit_code(status),
        Err(e) => {
            debug!(error = %e, "Failed to stop child cleanly");
            SENTINEL_EXIT_CODE
        }
    }
}

fn exit_code(status: ExitStatus) -> i32 {
    // Killed by a signal: no code to report
    status.code().unwrap_or(SENTINEL_EXIT_CODE)
}
