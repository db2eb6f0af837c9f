//! Spawning a task's argv as a child process.

use std::io;
use std::process::Stdio;

use tokio::process::{Child, Command};
use tubeq_core::Task;

use super::output::MergedOutput;

/// Hide the console window yt-dlp would otherwise open on Windows.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// A spawned task and the merged stdout/stderr of its child.
pub struct SpawnedTask {
    pub child: Child,
    pub output: MergedOutput,
}

/// Base command for `task`: argv, working directory, no stdin.
///
/// Output streams are left for the caller to configure. The child is killed
/// if its handle is dropped before it exits.
pub fn task_command(task: &Task) -> io::Result<Command> {
    let program = task
        .program()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "task has an empty command"))?;

    let mut cmd = Command::new(program);
    cmd.args(task.args())
        .stdin(Stdio::null())
        // yt-dlp is Python; keep its progress output line-buffered on a pipe
        .env("PYTHONUNBUFFERED", "1")
        .kill_on_drop(true);

    if let Some(dir) = &task.working_dir {
        cmd.current_dir(dir);
    }

    #[cfg(windows)]
    cmd.creation_flags(CREATE_NO_WINDOW);

    Ok(cmd)
}

/// Spawn `task.command` with stdout and stderr sharing one pipe.
pub fn spawn_task(task: &Task) -> io::Result<SpawnedTask> {
    let mut cmd = task_command(task)?;
    let (reader, writer) = io::pipe()?;
    cmd.stdout(writer.try_clone()?).stderr(writer);

    let child = cmd.spawn()?;
    // The command holds the parent's copies of the write end; release them so
    // the reader sees end of stream when the child exits.
    drop(cmd);

    Ok(SpawnedTask {
        child,
        output: MergedOutput::new(reader)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_command_is_invalid_input() {
        let task = Task::new("t1", "empty", Vec::new());
        let err = spawn_task(&task).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn missing_program_is_not_found() {
        let task = Task::new("t1", "missing", vec!["/nonexistent/tubeq-missing-tool".into()]);
        let err = spawn_task(&task).err().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn stdout_and_stderr_share_one_ordered_stream() {
        let script = "echo a; echo b >&2; echo c; echo d >&2";
        let task = Task::new("t1", "mix", vec!["sh".into(), "-c".into(), script.into()]);
        let SpawnedTask { mut child, mut output } = spawn_task(&task).unwrap();

        let mut lines = Vec::new();
        while let Some(line) = output.next_line().await.unwrap() {
            lines.push(line);
        }
        assert!(child.wait().await.unwrap().success());
        assert_eq!(lines, ["a\n", "b\n", "c\n", "d\n"]);
    }

    #[tokio::test]
    #[cfg(unix)]
    async fn runs_in_working_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let task = Task::new("t1", "pwd", vec!["pwd".into()]).with_working_dir(dir.path());
        let SpawnedTask { mut child, mut output } = spawn_task(&task).unwrap();

        let printed = output.next_line().await.unwrap().unwrap();
        child.wait().await.unwrap();
        assert_eq!(
            std::path::Path::new(printed.trim()).canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }
}
