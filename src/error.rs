use std::{fmt, io, path::PathBuf};

/// Errors surfaced by loggers and their configuration.
///
/// Admission rejection (a message below the threshold) is not an error and
/// never shows up here.
#[derive(Debug)]
pub enum LogError {
    /// The sink could not be opened or written. `path` is set for file sinks.
    Sink {
        path: Option<PathBuf>,
        source: io::Error,
    },
    /// The configuration file could not be read.
    Io(io::Error),
    /// The configuration content is invalid.
    Config(String),
    /// A priority label or code that does not name a priority.
    UnknownPriority(String),
}

impl LogError {
    pub(crate) fn sink(path: Option<PathBuf>, source: io::Error) -> Self {
        LogError::Sink { path, source }
    }
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use LogError::*;
        match self {
            Sink {
                path: Some(path),
                source,
            } => write!(f, "log sink {} failed: {source}", path.display()),
            Sink { path: None, source } => write!(f, "log sink failed: {source}"),
            Io(e) => write!(f, "I/O error: {e}"),
            Config(msg) => write!(f, "invalid logging configuration: {msg}"),
            UnknownPriority(raw) => write!(f, "unknown priority: {raw:?}"),
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Sink { source, .. } => Some(source),
            LogError::Io(e) => Some(e),
            LogError::Config(_) | LogError::UnknownPriority(_) => None,
        }
    }
}

impl From<io::Error> for LogError {
    fn from(e: io::Error) -> Self {
        LogError::Io(e)
    }
}
