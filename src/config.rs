use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::LogError;
use crate::log::{
    BufferedLogger, FileSink, ImmediateLogger, LogSink, Logger, Priority, StreamSink,
};

/// Section read by [`LoggerSettings::from_config`].
pub const LOGGING_SECTION: &str = "Logging";

/// INI-style configuration: `[section]` headers, `key = value` pairs,
/// `#` comments, optionally quoted values.
#[derive(Debug)]
pub struct Config {
    pub globals: HashMap<String, String>,
    pub sections: HashMap<String, HashMap<String, String>>,
}

impl Config {
    /// # Errors
    ///
    /// Returns [`LogError::Io`] if the file cannot be read.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, LogError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::parse(&content))
    }

    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut globals = HashMap::new();
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current_section: Option<String> = None;

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                current_section = Some(name.trim().to_string());
                continue;
            }

            if let Some(pos) = line.find('=') {
                let key = line[..pos].trim().to_string();
                let value = line[pos + 1..].trim().trim_matches('"').to_string();

                match &current_section {
                    None => {
                        globals.insert(key, value);
                    }
                    Some(sec) => {
                        sections.entry(sec.clone()).or_default().insert(key, value);
                    }
                }
            }
        }
        Config { globals, sections }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            globals: HashMap::new(),
            sections: HashMap::new(),
        }
    }

    #[must_use]
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|sec| sec.get(key))
            .map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty(&self, section: &str, key: &str) -> Option<&str> {
        self.get(section, key).filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn get_global(&self, key: &str) -> Option<&str> {
        self.globals.get(key).map(|s| s.as_str())
    }

    #[must_use]
    pub fn get_non_empty_or_default<'a>(
        &'a self,
        section: &str,
        key: &str,
        default: &'a str,
    ) -> &'a str {
        self.get_non_empty(section, key)
            .or_else(|| self.get_global(key).filter(|s| !s.is_empty()))
            .unwrap_or(default)
    }
}

/// Whether the built logger buffers until flush or writes at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoggerMode {
    #[default]
    Buffered,
    Immediate,
}

/// Where rendered lines go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    #[default]
    Stdout,
    Stderr,
    File(PathBuf),
}

/// Logger description read from the `[Logging]` section.
///
/// ```ini
/// [Logging]
/// priority = warning
/// mode = buffered
/// target = file
/// file = ~/logs/app.log
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoggerSettings {
    pub priority: Priority,
    pub mode: LoggerMode,
    pub target: LogTarget,
}

impl LoggerSettings {
    /// Reads `[Logging]`, falling back to globals, then to defaults.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::UnknownPriority`] for a bad `priority`, or
    /// [`LogError::Config`] for a bad `mode`/`target` or a file target
    /// without `file`.
    pub fn from_config(config: &Config) -> Result<Self, LogError> {
        let priority = config
            .get_non_empty_or_default(LOGGING_SECTION, "priority", Priority::default().label())
            .parse::<Priority>()?;

        let mode = match config
            .get_non_empty_or_default(LOGGING_SECTION, "mode", "buffered")
            .to_ascii_lowercase()
            .as_str()
        {
            "buffered" => LoggerMode::Buffered,
            "immediate" => LoggerMode::Immediate,
            other => return Err(LogError::Config(format!("unknown mode {other:?}"))),
        };

        let target = match config
            .get_non_empty_or_default(LOGGING_SECTION, "target", "stdout")
            .to_ascii_lowercase()
            .as_str()
        {
            "stdout" => LogTarget::Stdout,
            "stderr" => LogTarget::Stderr,
            "file" => {
                let file = config
                    .get_non_empty(LOGGING_SECTION, "file")
                    .or_else(|| config.get_global("file").filter(|s| !s.is_empty()))
                    .ok_or_else(|| LogError::Config("target = file requires `file`".into()))?;
                LogTarget::File(expand_path(file))
            }
            other => return Err(LogError::Config(format!("unknown target {other:?}"))),
        };

        Ok(Self {
            priority,
            mode,
            target,
        })
    }

    /// Builds the described logger with its threshold applied.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::Sink`] if a file target cannot be created.
    pub fn build(&self) -> Result<Arc<dyn Logger>, LogError> {
        let sink: Box<dyn LogSink> = match &self.target {
            LogTarget::Stdout => Box::new(StreamSink::stdout()),
            LogTarget::Stderr => Box::new(StreamSink::stderr()),
            LogTarget::File(path) => Box::new(
                FileSink::create(path).map_err(|e| LogError::sink(Some(path.clone()), e))?,
            ),
        };
        let logger: Arc<dyn Logger> = match self.mode {
            LoggerMode::Buffered => Arc::new(BufferedLogger::with_priority(sink, self.priority)),
            LoggerMode::Immediate => Arc::new(ImmediateLogger::with_priority(sink, self.priority)),
        };
        Ok(logger)
    }
}

/// Expands a leading tilde (`~`) to the user's home directory.
fn expand_path(path_str: &str) -> PathBuf {
    if path_str.starts_with('~') {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(PathBuf::from);

        if let Some(mut home_path) = home {
            if path_str == "~" {
                return home_path;
            }
            if let Some(rest) = path_str
                .strip_prefix("~/")
                .or_else(|| path_str.strip_prefix("~\\"))
            {
                home_path.push(rest);
                return home_path;
            }
        }
    }
    PathBuf::from(path_str)
}
