use std::{fmt, str::FromStr};

use crate::error::LogError;

/// Label used when a raw priority code does not map to any [`Priority`].
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Defines the severity of a log message.
///
/// Variants are declared in ascending order, so the derived `Ord` is the
/// order used for threshold filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Priority {
    /// Fine-grained events that are mostly useful while debugging.
    Debug = 0,
    /// Coarse-grained progress of the application.
    #[default]
    Info = 1,
    /// Potentially harmful situations.
    Warning = 2,
    /// Error events that still allow the application to continue.
    Error = 3,
    /// Errors after which the application is not expected to continue.
    Fatal = 4,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 5] = [
        Priority::Debug,
        Priority::Info,
        Priority::Warning,
        Priority::Error,
        Priority::Fatal,
    ];

    /// Label written into rendered lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Priority::Debug => "Debug",
            Priority::Info => "Info",
            Priority::Warning => "Warning",
            Priority::Error => "Error",
            Priority::Fatal => "Fatal",
        }
    }

    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Priority::Debug),
            1 => Some(Priority::Info),
            2 => Some(Priority::Warning),
            3 => Some(Priority::Error),
            4 => Some(Priority::Fatal),
            _ => None,
        }
    }
}

/// Label for a raw priority code, falling back to [`UNKNOWN_LABEL`].
#[must_use]
pub fn priority_label(code: u8) -> &'static str {
    Priority::from_code(code).map_or(UNKNOWN_LABEL, Priority::label)
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TryFrom<u8> for Priority {
    type Error = LogError;

    fn try_from(code: u8) -> Result<Self, LogError> {
        Priority::from_code(code).ok_or_else(|| LogError::UnknownPriority(code.to_string()))
    }
}

/// Accepts labels case-insensitively (plus `warn`) or a numeric code.
impl FromStr for Priority {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Priority::try_from(code);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "debug" => Ok(Priority::Debug),
            "info" => Ok(Priority::Info),
            "warning" | "warn" => Ok(Priority::Warning),
            "error" => Ok(Priority::Error),
            "fatal" => Ok(Priority::Fatal),
            _ => Err(LogError::UnknownPriority(trimmed.to_owned())),
        }
    }
}
