//! Line reader for child output (non-UTF8-safe).
//!
//! yt-dlp and ffmpeg can emit non-UTF8 bytes (file names, progress bars).
//! `BufReader::lines()` would stop on invalid UTF-8, so lines are read as
//! bytes and decoded lossily.

use std::io;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// Reads newline-terminated lines from one stream.
///
/// Lines keep their trailing newline; a final unterminated line is returned
/// as-is before end of stream. `read_until` appends partial reads to `buf`
/// when its future is dropped by `select!`, so the buffer is only cleared
/// after a full line is returned.
pub struct LineReader<R> {
    reader: BufReader<R>,
    buf: Vec<u8>,
}

impl<R: AsyncRead + Unpin> LineReader<R> {
    pub fn new(stream: R) -> Self {
        Self {
            reader: BufReader::new(stream),
            buf: Vec::with_capacity(1024),
        }
    }

    /// Next line, or `None` at end of stream.
    pub async fn next_line(&mut self) -> io::Result<Option<String>> {
        let read = self.reader.read_until(b'\n', &mut self.buf).await?;
        if read == 0 && self.buf.is_empty() {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&self.buf).into_owned();
        self.buf.clear();
        Ok(Some(line))
    }
}
