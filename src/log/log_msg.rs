use std::panic::Location;

use chrono::{DateTime, Local};

use crate::log::log_level::Priority;

/// A single logged event.
///
/// The timestamp is taken when the message is built, not when it is
/// flushed. Fields are private: a `Message` never changes once constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    body: String,
    priority: Priority,
    timestamp: DateTime<Local>,
    source_file: String,
    source_line: Option<u32>,
}

impl Message {
    /// Creates a message without call-site information.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rustylog::log::{Message, Priority};
    ///
    /// let msg = Message::new("Connection established", Priority::Info);
    /// assert_eq!(msg.source_line(), None);
    /// ```
    pub fn new(body: impl Into<String>, priority: Priority) -> Self {
        Self::with_source(body, priority, "", None)
    }

    /// Creates an `Info` message.
    pub fn info(body: impl Into<String>) -> Self {
        Self::new(body, Priority::default())
    }

    /// Creates a message tagged with an explicit call site.
    pub fn with_source(
        body: impl Into<String>,
        priority: Priority,
        source_file: impl Into<String>,
        source_line: Option<u32>,
    ) -> Self {
        Self::at(body, priority, Local::now(), source_file, source_line)
    }

    /// Creates a message tagged with the caller's location.
    ///
    /// Relies on `#[track_caller]`; the location is best-effort and points at
    /// the nearest caller not itself marked `#[track_caller]`.
    #[track_caller]
    pub fn here(body: impl Into<String>, priority: Priority) -> Self {
        let loc = Location::caller();
        Self::with_source(body, priority, loc.file(), Some(loc.line()))
    }

    /// Creates a message with a fixed timestamp.
    pub fn at(
        body: impl Into<String>,
        priority: Priority,
        timestamp: DateTime<Local>,
        source_file: impl Into<String>,
        source_line: Option<u32>,
    ) -> Self {
        Self {
            body: body.into(),
            priority,
            timestamp,
            source_file: source_file.into(),
            source_line,
        }
    }

    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Source file of the call site, empty when unknown.
    #[must_use]
    pub fn source_file(&self) -> &str {
        &self.source_file
    }

    #[must_use]
    pub fn source_line(&self) -> Option<u32> {
        self.source_line
    }
}
