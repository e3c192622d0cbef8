//! Two writer threads taking strict turns at one append-only file, and a
//! third thread tailing that file.
//!
//! # Behavior
//!
//!   - The even producer writes random even values in 2..=1000, the odd
//!     producer random odd values in 1..=999, one decimal value per line.
//!
//!   - Writes alternate strictly: even, odd, even, odd, and so on. A
//!     [`TurnGate`] enforces this with one mutex and a condition variable per
//!     role, so a waiting producer sleeps instead of spinning.
//!
//!   - The [`TailReader`] polls the file on a fixed interval and prints every
//!     newly completed line exactly once. A line without its trailing newline
//!     yet is left for the next poll.
//!
//!   - Failures are reported through the `log` facade and never stop a loop.
//!     A failed append still hands the turn to the partner.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tandem::{FileSink, Producer, Role, Sink, TailReader, TurnGate};
//!
//! let dir = tempfile::tempdir()?;
//! let path = dir.path().join("numbers.txt");
//!
//! let gate = Arc::new(TurnGate::new());
//! let sink: Arc<dyn Sink> = Arc::new(FileSink::new(&path));
//! let mut even = Producer::new(Role::Even, gate.clone(), sink.clone());
//! let mut odd = Producer::new(Role::Odd, gate.clone(), sink);
//!
//! let mut written = Vec::new();
//! for _ in 0..2 {
//!     written.push(even.step().unwrap()?.to_string());
//!     written.push(odd.step().unwrap()?.to_string());
//! }
//!
//! let mut reader = TailReader::new(&path);
//! assert_eq!(reader.poll()?, written);
//! assert!(reader.poll()?.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod app;
mod error;
mod gate;
mod producer;
mod role;
mod shutdown;
mod sink;
mod sync;
mod tail;

pub use crate::app::{start, Config, Running};
pub use crate::error::{Error, Result};
pub use crate::gate::{Turn, TurnGate};
pub use crate::producer::Producer;
pub use crate::role::Role;
pub use crate::shutdown::Shutdown;
pub use crate::sink::{record, FileSink, Sink};
pub use crate::tail::TailReader;

#[doc(no_inline)]
pub use termcolor::ColorChoice;
