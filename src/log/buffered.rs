//! Logger that holds admitted messages until an explicit flush.
//!
//! # Flush protocol
//!
//! 1. Lock the sink. Flushes are serialized so two batches never interleave.
//! 2. Swap the buffer out under the buffer lock and release it at once;
//!    concurrent `write` calls keep appending to a fresh buffer.
//! 3. Format and write the batch.
//! 4. On failure, put the lines the sink did not write back in front of
//!    whatever arrived meanwhile. Lines already written are never repeated.
//!
//! The logger flushes itself on drop, so nothing admitted is silently lost
//! unless the sink fails at that point (reported on stderr).

use std::{
    io::{self, Write},
    mem,
    path::Path,
    sync::Mutex,
};

use crate::{
    error::LogError,
    log::{
        file_sink::FileSink,
        format::format_batch,
        log_level::Priority,
        log_msg::Message,
        log_sink::{LogSink, SinkError},
        logger::{Logger, Threshold, lock},
        stream_sink::StreamSink,
    },
};

/// Buffered logger over any [`LogSink`].
pub struct BufferedLogger<S: LogSink> {
    threshold: Threshold,
    buffer: Mutex<Vec<Message>>,
    sink: Mutex<S>,
}

/// Buffered logger over a caller-supplied writer.
pub type BufferedStreamLogger<W> = BufferedLogger<StreamSink<W>>;

/// Buffered logger over a file that is only opened while flushing.
pub type BufferedFileLogger = BufferedLogger<FileSink>;

impl<S: LogSink> BufferedLogger<S> {
    /// Creates a logger with the default `Info` threshold.
    pub fn new(sink: S) -> Self {
        Self::with_priority(sink, Priority::default())
    }

    pub fn with_priority(sink: S, priority: Priority) -> Self {
        Self {
            threshold: Threshold::new(priority),
            buffer: Mutex::new(Vec::new()),
            sink: Mutex::new(sink),
        }
    }

    /// Clone of the pending messages, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        lock(&self.buffer).clone()
    }
}

impl<W: Write + Send> BufferedStreamLogger<W> {
    pub fn to_stream(writer: W) -> Self {
        Self::new(StreamSink::new(writer))
    }
}

impl BufferedFileLogger {
    /// Truncates `path` and returns a logger appending to it on every flush.
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

impl<S: LogSink> Logger for BufferedLogger<S> {
    fn write(&self, message: Message) {
        if self.threshold.admits(&message) {
            lock(&self.buffer).push(message);
        }
    }

    fn flush(&self) -> Result<usize, LogError> {
        let mut sink = lock(&self.sink);

        let batch = mem::take(&mut *lock(&self.buffer));
        if batch.is_empty() {
            return Ok(0);
        }

        let lines = format_batch(&batch);
        match sink.write_lines(&lines) {
            Ok(()) => Ok(batch.len()),
            Err(SinkError { written, source }) => {
                let path = sink.path().map(Path::to_path_buf);
                let mut unwritten = batch;
                unwritten.drain(..written.min(unwritten.len()));
                let mut buffer = lock(&self.buffer);
                let newer = mem::replace(&mut *buffer, unwritten);
                buffer.extend(newer);
                Err(LogError::sink(path, source))
            }
        }
    }

    fn priority(&self) -> Priority {
        self.threshold.get()
    }

    fn set_priority(&self, priority: Priority) -> usize {
        self.threshold.set(priority);
        lock(&self.buffer)
            .iter()
            .filter(|m| m.priority() < priority)
            .count()
    }

    fn pending(&self) -> usize {
        lock(&self.buffer).len()
    }
}

impl<S: LogSink> Drop for BufferedLogger<S> {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            let _ = writeln!(io::stderr(), "(rustylog) final flush failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::log::{NoopSink, SharedBuffer};
    use std::{
        fs,
        sync::{
            Arc,
            atomic::{AtomicBool, Ordering},
        },
    };

    /// Sink that fails while `broken` is set.
    struct FlakySink {
        broken: Arc<AtomicBool>,
        out: SharedBuffer,
    }

    impl LogSink for FlakySink {
        fn write_lines(&mut self, lines: &[String]) -> Result<(), SinkError> {
            if self.broken.load(Ordering::SeqCst) {
                return Err(io::Error::other("disk full").into());
            }
            for line in lines {
                self.out.write_all(line.as_bytes())?;
            }
            Ok(())
        }
    }

    #[test]
    fn write_admits_at_or_above_threshold() {
        let logger = BufferedLogger::new(NoopSink);
        logger.write(Message::new("dbg", Priority::Debug));
        logger.write(Message::new("info", Priority::Info));
        logger.write(Message::new("fatal", Priority::Fatal));

        let bodies: Vec<String> = logger
            .snapshot()
            .iter()
            .map(|m| m.body().to_owned())
            .collect();
        assert_eq!(bodies, ["info", "fatal"]);
    }

    #[test]
    fn flush_writes_fifo_then_empties() {
        let out = SharedBuffer::new();
        let logger = BufferedStreamLogger::to_stream(out.clone());
        for i in 0..3 {
            logger.write(Message::new(format!("m{i}"), Priority::Error));
        }
        assert!(out.is_empty(), "nothing is written before flush");

        assert_eq!(logger.flush().unwrap(), 3);
        let lines = out.lines();
        assert_eq!(lines.len(), 3);
        for (i, line) in lines.iter().enumerate() {
            assert!(line.contains(&format!("\tm{i}\t")), "line {i}: {line}");
        }

        assert_eq!(logger.pending(), 0);
        assert_eq!(logger.flush().unwrap(), 0);
        assert_eq!(out.lines().len(), 3);
    }

    #[test]
    fn raising_threshold_keeps_buffered_messages() {
        let out = SharedBuffer::new();
        let logger = BufferedStreamLogger::to_stream(out.clone());
        logger.write(Message::new("info", Priority::Info));
        logger.write(Message::new("warn", Priority::Warning));

        assert_eq!(logger.set_priority(Priority::Error), 2);
        assert_eq!(logger.priority(), Priority::Error);
        logger.write(Message::new("late warn", Priority::Warning));

        assert_eq!(logger.flush().unwrap(), 2);
        let text = out.contents();
        assert!(text.contains("\tinfo\t"));
        assert!(text.contains("\twarn\t"));
        assert!(!text.contains("late warn"));
    }

    #[test]
    fn lowering_threshold_admits_debug() {
        let logger = BufferedLogger::new(NoopSink);
        assert_eq!(logger.set_priority(Priority::Debug), 0);
        logger.write(Message::new("dbg", Priority::Debug));
        assert_eq!(logger.pending(), 1);
    }

    #[test]
    fn failed_flush_keeps_buffer_for_retry() {
        let broken = Arc::new(AtomicBool::new(true));
        let out = SharedBuffer::new();
        let logger = BufferedLogger::new(FlakySink {
            broken: Arc::clone(&broken),
            out: out.clone(),
        });

        logger.write(Message::new("first", Priority::Info));
        let err = logger.flush().unwrap_err();
        assert!(matches!(err, LogError::Sink { path: None, .. }), "{err}");
        assert_eq!(logger.pending(), 1);

        logger.write(Message::new("second", Priority::Info));
        broken.store(false, Ordering::SeqCst);
        assert_eq!(logger.flush().unwrap(), 2);

        let lines = out.lines();
        assert!(lines[0].contains("\tfirst\t"));
        assert!(lines[1].contains("\tsecond\t"));
    }

    /// Writer whose second `write` call fails; every other call succeeds.
    struct SecondWriteFails {
        calls: usize,
        out: SharedBuffer,
    }

    impl Write for SecondWriteFails {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.calls == 2 {
                return Err(io::Error::other("interrupted mid-batch"));
            }
            self.out.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn retry_after_partial_failure_does_not_repeat_lines() {
        let out = SharedBuffer::new();
        let logger = BufferedStreamLogger::to_stream(SecondWriteFails {
            calls: 0,
            out: out.clone(),
        });
        logger.write(Message::new("a", Priority::Info));
        logger.write(Message::new("b", Priority::Info));

        assert!(logger.flush().is_err());
        assert_eq!(logger.pending(), 1, "only the unwritten line is kept");
        assert_eq!(logger.snapshot()[0].body(), "b");

        assert_eq!(logger.flush().unwrap(), 1);
        let bodies: Vec<String> = out
            .lines()
            .iter()
            .map(|l| l.split('\t').nth(2).unwrap().to_owned())
            .collect();
        assert_eq!(bodies, ["a", "b"]);
    }

    #[test]
    fn drop_performs_final_flush() {
        let out = SharedBuffer::new();
        {
            let logger = BufferedStreamLogger::to_stream(out.clone());
            logger.write(Message::new("bye", Priority::Warning));
        }
        assert_eq!(out.lines().len(), 1);
        assert!(out.contents().contains("\tWarning\tbye\t"));
    }

    #[test]
    fn file_logger_truncates_and_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("buffered.log");
        fs::write(&path, "old run\n").unwrap();

        let logger = BufferedFileLogger::to_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        logger.write(Message::new("one", Priority::Info));
        logger.flush().unwrap();
        logger.write(Message::new("two", Priority::Info));
        logger.flush().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\tone\t"));
        assert!(lines[1].contains("\ttwo\t"));
    }

    #[test]
    fn file_logger_reports_path_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone").join("x.log");
        match BufferedFileLogger::to_file(&missing) {
            Err(LogError::Sink { path: Some(p), .. }) => assert_eq!(p, missing),
            Err(other) => panic!("unexpected error {other}"),
            Ok(_) => panic!("expected failure for missing directory"),
        }
    }

    #[test]
    fn file_deleted_between_flushes_is_recreated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rotated.log");
        let logger = BufferedFileLogger::to_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        logger.write(Message::new("again", Priority::Info));
        assert_eq!(logger.flush().unwrap(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("\tagain\t"));
    }
}
