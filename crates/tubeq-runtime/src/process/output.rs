//! A child's stdout and stderr merged into one pipe.
//!
//! Both streams are attached to the write end of a single OS pipe, so lines
//! arrive in exactly the order the child wrote them.

use std::io;

#[cfg(unix)]
use std::os::fd::OwnedFd;

#[cfg(unix)]
use tokio::net::unix::pipe;
#[cfg(not(unix))]
use tokio::sync::mpsc;

#[cfg(unix)]
use super::stream::LineReader;

/// Read end of a merged output pipe.
pub struct MergedOutput {
    #[cfg(unix)]
    lines: LineReader<pipe::Receiver>,
    #[cfg(not(unix))]
    lines: mpsc::UnboundedReceiver<io::Result<String>>,
}

impl MergedOutput {
    /// Wrap the read end of a pipe. Must be called inside a tokio runtime.
    ///
    /// Every copy of the write end must be closed (the child's included) for
    /// the reader to see end of stream.
    #[cfg(unix)]
    pub fn new(reader: io::PipeReader) -> io::Result<Self> {
        let receiver = pipe::Receiver::from_owned_fd(OwnedFd::from(reader))?;
        Ok(Self {
            lines: LineReader::new(receiver),
        })
    }

    /// Wrap the read end of a pipe. Must be called inside a tokio runtime.
    ///
    /// Anonymous pipes cannot be registered with the reactor here, so a
    /// blocking thread reads lines and forwards them over a channel.
    #[cfg(not(unix))]
    pub fn new(reader: io::PipeReader) -> io::Result<Self> {
        use std::io::BufRead;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::task::spawn_blocking(move || {
            let mut reader = io::BufReader::new(reader);
            let mut buf = Vec::with_capacity(1024);
            loop {
                buf.clear();
                let line = match reader.read_until(b'\n', &mut buf) {
                    Ok(0) => break,
                    Ok(_) => Ok(String::from_utf8_lossy(&buf).into_owned()),
                    Err(e) => Err(e),
                };
                let failed = line.is_err();
                if tx.send(line).is_err() || failed {
                    break;
                }
            }
        });
        Ok(Self { lines: rx })
    }

    /// Next output line, or `None` once the child (and anything it spawned)
    /// has closed the pipe.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        #[cfg(unix)]
        {
            self.lines.next_line().await
        }
        #[cfg(not(unix))]
        {
            self.lines.recv().await.transpose()
        }
    }
}
