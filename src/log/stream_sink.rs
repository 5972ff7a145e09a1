use std::io::{self, Write};

use crate::log::log_sink::{LogSink, SinkError, write_each};

/// Sink over a caller-supplied writer (stdout, stderr, a socket, a
/// [`SharedBuffer`](crate::log::SharedBuffer), ...).
///
/// The writer is flushed after every batch so lines are visible as soon as
/// the logger flushes.
#[derive(Debug)]
pub struct StreamSink<W> {
    writer: W,
}

impl<W: Write + Send> StreamSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl StreamSink<io::Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl StreamSink<io::Stderr> {
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write + Send> LogSink for StreamSink<W> {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), SinkError> {
        write_each(&mut self.writer, lines)?;
        // Every line is already in the writer's hands; retrying would repeat them.
        self.writer
            .flush()
            .map_err(|e| SinkError::new(lines.len(), e))
    }
}
