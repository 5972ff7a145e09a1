use std::{fmt, io, path::Path};

/// Failure of a sink partway through a batch.
///
/// `written` counts the leading lines that reached the destination in full;
/// the owning logger keeps only the rest for a retry.
#[derive(Debug)]
pub struct SinkError {
    pub written: usize,
    pub source: io::Error,
}

impl SinkError {
    pub fn new(written: usize, source: io::Error) -> Self {
        Self { written, source }
    }
}

/// Failure before any line was written.
impl From<io::Error> for SinkError {
    fn from(source: io::Error) -> Self {
        Self::new(0, source)
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink failed after {} line(s): {}", self.written, self.source)
    }
}

impl std::error::Error for SinkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Destination for already-formatted log lines.
///
/// Implementations must write the lines in the order given. A sink is
/// only ever driven by one flush at a time; the owning logger serializes
/// access.
pub trait LogSink: Send {
    /// Writes a batch of newline-terminated lines.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] carrying the number of lines fully written
    /// before the destination failed. A line cut off midway counts as not
    /// written.
    fn write_lines(&mut self, lines: &[String]) -> Result<(), SinkError>;

    /// Path backing this sink, if it is a file. Used for error reports.
    fn path(&self) -> Option<&Path> {
        None
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), SinkError> {
        (**self).write_lines(lines)
    }

    fn path(&self) -> Option<&Path> {
        (**self).path()
    }
}

/// Writes `lines` one by one, counting the ones that went through.
pub(crate) fn write_each<W: io::Write + ?Sized>(
    writer: &mut W,
    lines: &[String],
) -> Result<(), SinkError> {
    for (written, line) in lines.iter().enumerate() {
        writer
            .write_all(line.as_bytes())
            .map_err(|e| SinkError::new(written, e))?;
    }
    Ok(())
}
