use crate::error::{Error, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only destination for records.
///
/// Producers only call `append` while holding their [`Turn`], so an
/// implementation never sees two appends at once.
///
/// [`Turn`]: crate::Turn
pub trait Sink: Send + Sync {
    fn append(&self, record: &str) -> Result<()>;
}

/// Formats `value` as one newline-terminated record.
pub fn record(value: u32) -> String {
    format!("{}\n", value)
}

/// Sink backed by a plain text file, created on first append.
///
/// Every append opens the file in append mode, writes the whole record,
/// flushes, and closes it again.
#[derive(Clone, Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSink { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn error(&self, source: std::io::Error) -> Error {
        Error::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Sink for FileSink {
    fn append(&self, record: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|err| self.error(err))?;
        file.write_all(record.as_bytes())
            .map_err(|err| self.error(err))?;
        file.flush().map_err(|err| self.error(err))
    }
}
