//! Running a batch of tasks to completion while echoing runner output.

use std::io::Write;

use tokio::process::Command;
use tracing::{info, warn};
use tubeq_core::{FinishAction, Platform, RunnerEvent, Settings, Task, TaskStatus};
use tubeq_runtime::{RunnerConfig, TaskRunner};

use crate::commands::FinishArgs;
use crate::error::CliError;

/// Tally of terminal task states seen on the event stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueSummary {
    pub total: usize,
    pub done: usize,
    pub failed: usize,
}

impl QueueSummary {
    pub const fn new(total: usize) -> Self {
        Self {
            total,
            done: 0,
            failed: 0,
        }
    }

    pub fn observe(&mut self, event: &RunnerEvent) {
        match event.as_task().map(Task::status) {
            Some(TaskStatus::Done) => self.done += 1,
            Some(TaskStatus::Error) => self.failed += 1,
            _ => {}
        }
    }

    pub const fn finished(&self) -> usize {
        self.done + self.failed
    }

    pub const fn skipped(&self) -> usize {
        self.total.saturating_sub(self.finished())
    }

    pub const fn is_complete(&self) -> bool {
        self.finished() >= self.total
    }

    /// Error unless every task finished with status `done`.
    pub fn check(&self) -> Result<(), CliError> {
        if self.failed == 0 && self.skipped() == 0 {
            Ok(())
        } else {
            Err(CliError::Tasks {
                failed: self.failed,
                skipped: self.skipped(),
            })
        }
    }
}

/// Run `tasks` on a runner configured from `settings`.
///
/// Log lines go to stdout as they arrive. Ctrl-C stops the runner; tasks
/// that never started count as skipped. The finish action only applies to a
/// queue that drained on its own.
pub async fn run(settings: &Settings, tasks: Vec<Task>, finish: FinishArgs) -> Result<(), CliError> {
    let mut summary = QueueSummary::new(tasks.len());
    let (runner, mut events) = TaskRunner::start(RunnerConfig::from(settings));
    for task in tasks {
        runner.enqueue(task);
    }

    let mut interrupted = false;
    while !summary.is_complete() {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                handle_event(&event, &mut summary)?;
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                eprintln!("Interrupted, stopping downloads...");
                runner.stop_all();
                interrupted = true;
                break;
            }
        }
    }

    runner.join().await;
    while let Some(event) = events.recv().await {
        handle_event(&event, &mut summary)?;
    }

    info!(
        done = summary.done,
        failed = summary.failed,
        skipped = summary.skipped(),
        "Queue finished"
    );
    summary.check()?;
    if !interrupted {
        apply_finish_action(settings.finish_action, finish.run_finish_action).await?;
    }
    Ok(())
}

fn handle_event(event: &RunnerEvent, summary: &mut QueueSummary) -> Result<(), CliError> {
    if let Some(line) = event.as_log() {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.flush()?;
    }
    summary.observe(event);
    Ok(())
}

async fn apply_finish_action(action: FinishAction, execute: bool) -> Result<(), CliError> {
    if matches!(action, FinishAction::None | FinishAction::Exit) {
        return Ok(());
    }

    let Some(argv) = action.command_for(Platform::current()) else {
        warn!(action = action.as_str(), "Finish action not supported on this platform");
        return Ok(());
    };

    if !execute {
        println!(
            "Finish action '{}' configured; pass --run-finish-action to execute it",
            action.as_str()
        );
        return Ok(());
    }

    info!(action = action.as_str(), "Running finish action");
    let Some((program, args)) = argv.split_first() else {
        return Ok(());
    };
    let status = Command::new(program).args(args).status().await?;
    if status.success() {
        Ok(())
    } else {
        Err(CliError::Process(format!(
            "finish action '{}' exited with {status}",
            action.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminal(code: i32) -> RunnerEvent {
        let mut task = Task::new("t", "t", vec!["yt-dlp".into()]);
        task.mark_running();
        task.finish(code);
        RunnerEvent::Task(task)
    }

    #[test]
    fn test_summary_counts_terminal_snapshots_only() {
        let mut summary = QueueSummary::new(3);
        let mut running = Task::new("r", "r", vec!["yt-dlp".into()]);
        running.mark_running();

        summary.observe(&RunnerEvent::Task(running));
        summary.observe(&RunnerEvent::Log("[RUN] r\n".into()));
        summary.observe(&terminal(0));
        summary.observe(&terminal(2));

        assert_eq!(summary.done, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped(), 1);
        assert!(!summary.is_complete());
    }

    #[test]
    fn test_summary_result() {
        let mut ok = QueueSummary::new(1);
        ok.observe(&terminal(0));
        assert!(ok.check().is_ok());

        let mut bad = QueueSummary::new(2);
        bad.observe(&terminal(1));
        assert!(matches!(
            bad.check(),
            Err(CliError::Tasks { failed: 1, skipped: 1 })
        ));
    }

    #[tokio::test]
    async fn test_no_finish_action_is_a_no_op() {
        apply_finish_action(FinishAction::None, true).await.unwrap();
        apply_finish_action(FinishAction::Exit, true).await.unwrap();
    }
}
