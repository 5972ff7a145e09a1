use std::{
    io::{self, Write},
    sync::{Arc, Mutex, PoisonError},
};

/// Cloneable in-memory stream target.
///
/// Every clone appends to the same bytes, so a caller can hand one clone to a
/// logger and keep another to read the rendered lines back, e.g. to show
/// recent log output in a status view or to assert on it in tests.
///
/// ```rust
/// use rustylog::log::{ImmediateLogger, Logger, Message, Priority, SharedBuffer};
///
/// let recent = SharedBuffer::new();
/// let logger = ImmediateLogger::to_stream(recent.clone());
/// logger.write(Message::new("cache warmed", Priority::Info));
/// assert!(recent.lines()[0].ends_with("\tInfo\tcache warmed\t\t-1"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    /// Convenience: the written text split into lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_owned).collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
