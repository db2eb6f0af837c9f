//! Stopping a running download with SIGTERM → SIGKILL escalation.

use std::io;
use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Child;
#[cfg(unix)]
use tokio::time::timeout;

#[cfg(unix)]
use nix::sys::signal::{self, Signal};
#[cfg(unix)]
use nix::unistd::Pid;

/// Default time a child gets to exit after SIGTERM.
pub const DEFAULT_STOP_GRACE: Duration = Duration::from_secs(5);

/// Ask `child` to stop and reap it.
///
/// On Unix the child receives SIGTERM and has `grace` to exit before it is
/// killed. Elsewhere it is killed immediately. A child that already exited is
/// simply reaped.
pub async fn stop_child(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    #[cfg(unix)]
    {
        stop_unix(child, grace).await
    }

    #[cfg(not(unix))]
    {
        let _ = grace;
        child.kill().await?;
        child.wait().await
    }
}

#[cfg(unix)]
async fn stop_unix(child: &mut Child, grace: Duration) -> io::Result<ExitStatus> {
    // No PID means the child has already been reaped
    let Some(pid) = child.id() else {
        return child.wait().await;
    };
    let pid = i32::try_from(pid).map_err(io::Error::other)?;

    if let Err(e) = signal::kill(Pid::from_raw(pid), Signal::SIGTERM) {
        if e == nix::errno::Errno::ESRCH {
            return child.wait().await;
        }
        return Err(io::Error::other(e));
    }

    if let Ok(status) = timeout(grace, child.wait()).await {
        return status;
    }

    tracing::debug!(pid, "child ignored SIGTERM, sending SIGKILL");
    child.kill().await?;
    child.wait().await
}
