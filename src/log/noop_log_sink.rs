use crate::log::log_sink::{LogSink, SinkError};

/// Sink that drops every line. Handy for measuring filtering overhead.
#[derive(Debug, Clone, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    #[inline]
    fn write_lines(&mut self, _lines: &[String]) -> Result<(), SinkError> {
        Ok(())
    }
}
