//! `tubeq get`: download URLs with the configured settings.

use tracing::debug;
use tubeq_core::build_command;

use super::{new_task, queue};
use crate::bootstrap::CliContext;
use crate::commands::FinishArgs;
use crate::error::CliError;

pub async fn execute(ctx: &CliContext, urls: &[String], finish: FinishArgs) -> Result<(), CliError> {
    let settings = ctx.validated_settings()?;
    let tasks = urls
        .iter()
        .map(|url| new_task(url, build_command(settings, url, None)))
        .collect::<Vec<_>>();
    debug!(count = tasks.len(), "Queueing downloads");
    queue::run(settings, tasks, finish).await
}
