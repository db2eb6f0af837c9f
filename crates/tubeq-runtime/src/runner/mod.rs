//! Background task runner.
//!
//! Tasks are queued FIFO and executed by a fixed pool of workers, one child
//! process per worker at a time. With the default single worker, at most one
//! download runs at any moment.
//!
//! Everything a consumer needs to know arrives on one event channel:
//! - `RunnerEvent::Log` carries markers (`[QUEUE]`, `[RUN]`, `[RETRY]`,
//!   `[ERROR]`, `[END]`) and every output line of the child, verbatim
//! - `RunnerEvent::Task` carries a snapshot of a task each time its status
//!   changes: once when it starts running, once when it reaches a terminal
//!   status
//!
//! The channel is unbounded, so neither `enqueue` nor the workers ever wait
//! on a slow consumer.

mod markers;
mod worker;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use tubeq_core::{RunnerEvent, Settings, Task};

use crate::process::DEFAULT_STOP_GRACE;

/// Runner tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    /// Number of tasks executed concurrently. Values below 1 are treated as 1.
    pub workers: usize,
    /// Extra attempts after a non-zero exit.
    pub retries: u32,
    /// Pause between attempts.
    pub retry_delay: Duration,
    /// Time a child gets to exit after a stop request before it is killed.
    pub stop_grace: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            retries: 0,
            retry_delay: Duration::ZERO,
            stop_grace: DEFAULT_STOP_GRACE,
        }
    }
}

impl From<&Settings> for RunnerConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            workers: usize::try_from(settings.queue_max_concurrent.max(1)).unwrap_or(1),
            retries: settings.queue_retry,
            retry_delay: Duration::from_secs(settings.queue_retry_sleep),
            ..Self::default()
        }
    }
}

/// Sending half of the event channel.
///
/// A dropped receiver only means nobody is listening; workers keep going.
#[derive(Clone)]
pub(crate) struct EventSink(mpsc::UnboundedSender<RunnerEvent>);

impl EventSink {
    pub(crate) fn log(&self, line: impl Into<String>) {
        let _ = self.0.send(RunnerEvent::Log(line.into()));
    }

    pub(crate) fn task(&self, task: &Task) {
        let _ = self.0.send(RunnerEvent::Task(task.clone()));
    }
}

/// State shared by every worker of one runner.
pub(crate) struct Shared {
    pub(crate) config: RunnerConfig,
    pub(crate) queue: Mutex<mpsc::UnboundedReceiver<Task>>,
    pub(crate) events: EventSink,
    pub(crate) cancel: CancellationToken,
}

/// Handle to a running pool of workers.
///
/// Dropping the handle closes the queue: workers finish what is already
/// queued and then exit. Use [`TaskRunner::stop_all`] to abandon the queue.
pub struct TaskRunner {
    queue: mpsc::UnboundedSender<Task>,
    events: EventSink,
    cancel: CancellationToken,
    workers: Vec<JoinHandle<()>>,
}

impl TaskRunner {
    /// Spawn the worker pool on the current tokio runtime.
    ///
    /// Returns the handle and the receiving end of the event channel.
    pub fn start(config: RunnerConfig) -> (Self, mpsc::UnboundedReceiver<RunnerEvent>) {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let events = EventSink(events_tx);
        let cancel = CancellationToken::new();
        let worker_count = config.workers.max(1);

        let shared = Arc::new(Shared {
            config,
            queue: Mutex::new(queue_rx),
            events: events.clone(),
            cancel: cancel.clone(),
        });

        let workers = (0..worker_count)
            .map(|index| tokio::spawn(worker::run(index, Arc::clone(&shared))))
            .collect();

        debug!(workers = worker_count, "Task runner started");

        let runner = Self {
            queue: queue_tx,
            events,
            cancel,
            workers,
        };
        (runner, events_rx)
    }

    /// Append `task` to the queue.
    ///
    /// The task is reset to `queued` whatever snapshot it carries. The
    /// `[QUEUE]` marker is emitted before the task becomes visible to the
    /// workers, so it always precedes the task's `[RUN]`. Never blocks.
    pub fn enqueue(&self, mut task: Task) {
        task.reset();
        debug!(task_id = %task.id, label = %task.label, "Queueing task");
        self.events.log(markers::queued(&task.label));
        if self.queue.send(task).is_err() {
            // Every worker is gone; only possible after a stop
            debug!("Task queued after the runner stopped");
        }
    }

    /// Stop the runner.
    ///
    /// Running children are asked to terminate (SIGTERM, then SIGKILL after
    /// the grace period) and finish with status `error`. Queued tasks are
    /// never started. Idempotent.
    pub fn stop_all(&self) {
        if !self.cancel.is_cancelled() {
            info!("Stopping task runner");
        }
        self.cancel.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the queue and wait for the workers to drain it.
    ///
    /// After a [`stop_all`](Self::stop_all) this returns as soon as every
    /// running child has been reaped.
    pub async fn join(self) {
        let Self { queue, workers, .. } = self;
        drop(queue);
        for handle in workers {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "Runner worker panicked");
            }
        }
    }
}
