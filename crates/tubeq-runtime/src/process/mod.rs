//! Child process plumbing shared by the runner and the metadata probe.

mod output;
mod shutdown;
mod spawn;
mod stream;

pub use output::MergedOutput;
pub use shutdown::{DEFAULT_STOP_GRACE, stop_child};
pub use spawn::{SpawnedTask, spawn_task, task_command};
pub use stream::LineReader;
