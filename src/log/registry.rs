//! Active-logger slot and the process-wide facade built on it.
//!
//! A [`LoggerRegistry`] holds at most one shared logger. Call sites that do
//! not carry a logger reference go through the process-wide registry via the
//! free functions re-exported from [`crate::log`]:
//!
//! ```rust
//! use std::sync::Arc;
//! use rustylog::log::{self, BufferedStreamLogger, Logger, Message, Priority, SharedBuffer};
//!
//! let out = SharedBuffer::new();
//! let logger = Arc::new(BufferedStreamLogger::to_stream(out.clone()));
//! let _previous = log::init(logger.clone());
//! log::write(Message::new("app started", Priority::Info));
//! log::flush().unwrap();
//! assert!(out.contents().contains("app started"));
//! assert_eq!(logger.pending(), 0);
//! ```
//!
//! The registry only borrows a logger's lifetime: the installer keeps its own
//! `Arc` and decides when the logger dies. Swapping never flushes the logger
//! being replaced; it is handed back from [`init`]/[`teardown`]. Buffered
//! loggers flush themselves once the last `Arc` to them is dropped, so
//! dropping that returned value without another owner flushes it.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{
    error::LogError,
    log::{log_level::Priority, log_msg::Message, logger::Logger},
};

/// Slot for the currently active logger.
#[derive(Default)]
pub struct LoggerRegistry {
    active: RwLock<Option<Arc<dyn Logger>>>,
}

impl LoggerRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: RwLock::new(None),
        }
    }

    /// Installs `logger`, returning the one it replaces (not flushed).
    #[must_use = "dropping the previous logger flushes it"]
    pub fn init(&self, logger: Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
        self.active
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(logger)
    }

    /// Removes the active logger and hands it back to the caller.
    #[must_use = "dropping the previous logger flushes it"]
    pub fn teardown(&self) -> Option<Arc<dyn Logger>> {
        self.active
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// The active logger, if any.
    #[must_use]
    pub fn get(&self) -> Option<Arc<dyn Logger>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn write(&self, message: Message) {
        if let Some(logger) = self.get() {
            logger.write(message);
        }
    }

    /// Flushes the active logger; `Ok(0)` when none is installed.
    ///
    /// # Errors
    ///
    /// Forwards the active logger's sink failure.
    pub fn flush(&self) -> Result<usize, LogError> {
        self.get().map_or(Ok(0), |logger| logger.flush())
    }

    /// Threshold of the active logger; `Priority::Info` when none is installed.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.get()
            .map_or(Priority::default(), |logger| logger.priority())
    }

    pub fn set_priority(&self, priority: Priority) -> usize {
        self.get()
            .map_or(0, |logger| logger.set_priority(priority))
    }
}

static GLOBAL: LoggerRegistry = LoggerRegistry::new();

/// The process-wide registry behind the free functions below.
#[must_use]
pub fn global() -> &'static LoggerRegistry {
    &GLOBAL
}

/// Installs the process-wide logger. See [`LoggerRegistry::init`].
#[must_use = "dropping the previous logger flushes it"]
pub fn init(logger: Arc<dyn Logger>) -> Option<Arc<dyn Logger>> {
    GLOBAL.init(logger)
}

#[must_use = "dropping the previous logger flushes it"]
pub fn teardown() -> Option<Arc<dyn Logger>> {
    GLOBAL.teardown()
}

#[must_use]
pub fn get() -> Option<Arc<dyn Logger>> {
    GLOBAL.get()
}

pub fn write(message: Message) {
    GLOBAL.write(message);
}

/// # Errors
///
/// Forwards the active logger's sink failure.
pub fn flush() -> Result<usize, LogError> {
    GLOBAL.flush()
}

#[must_use]
pub fn priority() -> Priority {
    GLOBAL.priority()
}

pub fn set_priority(priority: Priority) -> usize {
    GLOBAL.set_priority(priority)
}
