use std::{
    fs::{File, OpenOptions},
    io,
    path::{Path, PathBuf},
};

use crate::log::log_sink::{LogSink, SinkError, write_each};

/// Sink owning a log file path.
///
/// The file is truncated when the sink is created. Each batch opens the
/// file in append mode, writes and closes it again, so no handle is held
/// between flushes.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    /// Creates the sink, truncating (or creating) the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the file cannot be created.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        File::create(&path)?;
        Ok(Self { path })
    }
}

impl LogSink for FileSink {
    fn write_lines(&mut self, lines: &[String]) -> Result<(), SinkError> {
        // Unbuffered so a failure can be pinned to the line it hit.
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        write_each(&mut file, lines)
        // `file` drops here and closes.
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}
