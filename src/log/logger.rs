use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicU8, Ordering},
};

use crate::{
    error::LogError,
    log::{log_level::Priority, log_msg::Message},
};

/// Capability shared by every logger.
///
/// All methods take `&self`; implementations synchronize internally so one
/// logger can be shared between threads (and installed in the global
/// facade).
///
/// # Admission
///
/// A message is admitted iff `message.priority() >= self.priority()` at the
/// moment `write` is called. Rejected messages are dropped silently.
pub trait Logger: Send + Sync {
    /// Admits or drops `message`.
    fn write(&self, message: Message);

    /// Renders pending messages to the sink and returns how many were written.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Sink`] if the sink fails. Pending messages are kept
    /// so the call can be retried.
    fn flush(&self) -> Result<usize, LogError>;

    /// Current admission threshold.
    fn priority(&self) -> Priority;

    /// Replaces the threshold for future writes.
    ///
    /// Returns how many already-buffered messages sit below the new threshold.
    /// They are not evicted.
    fn set_priority(&self, priority: Priority) -> usize;

    /// Number of admitted messages waiting for a flush.
    fn pending(&self) -> usize {
        0
    }
}

impl<L: Logger + ?Sized> Logger for Arc<L> {
    fn write(&self, message: Message) {
        (**self).write(message);
    }
    fn flush(&self) -> Result<usize, LogError> {
        (**self).flush()
    }
    fn priority(&self) -> Priority {
        (**self).priority()
    }
    fn set_priority(&self, priority: Priority) -> usize {
        (**self).set_priority(priority)
    }
    fn pending(&self) -> usize {
        (**self).pending()
    }
}

/// Atomic admission threshold.
#[derive(Debug)]
pub(crate) struct Threshold(AtomicU8);

impl Threshold {
    pub(crate) fn new(priority: Priority) -> Self {
        Self(AtomicU8::new(priority.code()))
    }

    pub(crate) fn get(&self) -> Priority {
        Priority::from_code(self.0.load(Ordering::Acquire)).unwrap_or_default()
    }

    pub(crate) fn set(&self, priority: Priority) {
        self.0.store(priority.code(), Ordering::Release);
    }

    pub(crate) fn admits(&self, message: &Message) -> bool {
        message.priority() >= self.get()
    }
}

/// Locks `m`, recovering the data if another thread panicked while holding it.
pub(crate) fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}
