use std::{io::Write, path::Path, sync::Mutex};

use crate::{
    error::LogError,
    log::{
        file_sink::FileSink,
        format::format_line,
        log_level::Priority,
        log_msg::Message,
        log_sink::{LogSink, SinkError},
        logger::{Logger, Threshold, lock},
        stream_sink::StreamSink,
    },
};

/// Logger that renders every admitted message straight to its sink.
///
/// Nothing is buffered, so `flush` has nothing to write. A sink failure
/// during `write` cannot be returned to the caller; the first one is kept
/// and handed back by the next `flush`.
pub struct ImmediateLogger<S: LogSink> {
    threshold: Threshold,
    sink: Mutex<S>,
    deferred: Mutex<Option<LogError>>,
}

impl<S: LogSink> ImmediateLogger<S> {
    pub fn new(sink: S) -> Self {
        Self::with_priority(sink, Priority::default())
    }

    pub fn with_priority(sink: S, priority: Priority) -> Self {
        Self {
            threshold: Threshold::new(priority),
            sink: Mutex::new(sink),
            deferred: Mutex::new(None),
        }
    }
}

impl<W: Write + Send> ImmediateLogger<StreamSink<W>> {
    pub fn to_stream(writer: W) -> Self {
        Self::new(StreamSink::new(writer))
    }
}

impl ImmediateLogger<FileSink> {
    /// Truncates `path`; every admitted message is appended right away.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Sink`] if the file cannot be created.
    pub fn to_file<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let path = path.as_ref();
        let sink =
            FileSink::create(path).map_err(|e| LogError::sink(Some(path.to_path_buf()), e))?;
        Ok(Self::new(sink))
    }
}

impl<S: LogSink> Logger for ImmediateLogger<S> {
    fn write(&self, message: Message) {
        if !self.threshold.admits(&message) {
            return;
        }
        let line = format_line(&message);
        let mut sink = lock(&self.sink);
        if let Err(e) = sink.write_lines(std::slice::from_ref(&line)) {
            let mut deferred = lock(&self.deferred);
            if deferred.is_none() {
                *deferred = Some(LogError::sink(sink.path().map(Path::to_path_buf), e.source));
            }
        }
    }

    fn flush(&self) -> Result<usize, LogError> {
        match lock(&self.deferred).take() {
            Some(e) => Err(e),
            None => Ok(0),
        }
    }

    fn priority(&self) -> Priority {
        self.threshold.get()
    }

    fn set_priority(&self, priority: Priority) -> usize {
        self.threshold.set(priority);
        0
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::SharedBuffer;
    use std::io;

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn write_lines(&mut self, _lines: &[String]) -> Result<(), SinkError> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed").into())
        }
    }

    #[test]
    fn writes_without_flush() {
        let out = SharedBuffer::new();
        let logger = ImmediateLogger::to_stream(out.clone());
        logger.write(Message::new("now", Priority::Error));
        assert!(out.contents().contains("\tError\tnow\t"));
        assert_eq!(logger.pending(), 0);
    }

    #[test]
    fn filters_below_threshold() {
        let out = SharedBuffer::new();
        let logger = ImmediateLogger::to_stream(out.clone());
        logger.write(Message::new("hidden", Priority::Debug));
        assert!(out.is_empty());

        assert_eq!(logger.set_priority(Priority::Debug), 0);
        logger.write(Message::new("shown", Priority::Debug));
        assert_eq!(out.lines().len(), 1);
    }

    #[test]
    fn flush_is_noop_returning_zero() {
        let logger = ImmediateLogger::to_stream(SharedBuffer::new());
        logger.write(Message::new("x", Priority::Info));
        assert_eq!(logger.flush().unwrap(), 0);
        assert_eq!(logger.flush().unwrap(), 0);
    }

    #[test]
    fn write_failure_surfaces_once_on_flush() {
        let logger = ImmediateLogger::new(BrokenSink);
        logger.write(Message::new("lost", Priority::Fatal));
        logger.write(Message::new("lost too", Priority::Fatal));

        assert!(matches!(logger.flush(), Err(LogError::Sink { .. })));
        assert_eq!(logger.flush().unwrap(), 0);
    }

    #[test]
    fn file_variant_appends_each_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("immediate.log");
        let logger = ImmediateLogger::to_file(&path).unwrap();

        logger.write(Message::new("a", Priority::Info));
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 1);
        logger.write(Message::new("b", Priority::Info));
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 2);
    }
}
