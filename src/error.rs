use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the writer, reader, and startup paths.
///
/// None of these stop a running loop. Producers and the tail reader report
/// them and carry on with their next iteration.
#[derive(Error, Debug)]
pub enum Error {
    /// Appending a record to the backing store failed.
    #[error("failed to append to {}: {source}", path.display())]
    Write {
        /// The backing store being appended to.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading new records from the backing store failed. The cursor was not
    /// advanced.
    #[error("failed to read from {}: {source}", path.display())]
    Read {
        /// The backing store being tailed.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The operating system refused to start one of the loops.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        /// Name of the thread that could not be started.
        name: &'static str,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
