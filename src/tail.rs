use crate::error::{Error, Result};
use crate::role::Role;
use crate::shutdown::Shutdown;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::PathBuf;
use std::time::Duration;
use termcolor::{Color, ColorSpec, WriteColor};

/// Follows the backing store from a private byte offset.
///
/// Only newline-terminated records are consumed. A record still being written
/// at poll time is left for a later poll, and its bytes are not counted.
///
/// ```
/// use std::fs;
/// use tandem::TailReader;
///
/// let dir = tempfile::tempdir()?;
/// let path = dir.path().join("numbers.txt");
/// let mut reader = TailReader::new(&path);
///
/// assert!(reader.poll()?.is_empty());
///
/// fs::write(&path, "4\n7\n10")?;
/// assert_eq!(reader.poll()?, ["4", "7"]);
/// assert_eq!(reader.cursor, 4);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[readonly::make]
#[derive(Debug)]
pub struct TailReader {
    path: PathBuf,

    /// Byte offset just past the last record emitted. Starts at 0 and is not
    /// persisted, so a new reader replays the whole store.
    ///
    /// This field is read-only; writing to its value will not compile.
    #[readonly]
    pub cursor: u64,
}

impl TailReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        TailReader {
            path: path.into(),
            cursor: 0,
        }
    }

    /// Reads every complete record appended since the previous poll.
    ///
    /// A missing store yields no records and no error. On error the cursor is
    /// left where it was, so the next poll retries from the same offset.
    pub fn poll(&mut self) -> Result<Vec<String>> {
        let mut file = match File::open(&self.path) {
            Ok(file) => file,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(self.error(err)),
        };

        let mut buf = Vec::new();
        file.seek(SeekFrom::Start(self.cursor))
            .and_then(|_| file.read_to_end(&mut buf))
            .map_err(|err| self.error(err))?;

        let end = match buf.iter().rposition(|&b| b == b'\n') {
            Some(end) => end,
            None => return Ok(Vec::new()),
        };
        let records = buf[..end]
            .split(|&b| b == b'\n')
            .map(|line| String::from_utf8_lossy(line).into_owned())
            .collect();
        self.cursor += end as u64 + 1;
        Ok(records)
    }

    /// Polls every `interval` and prints new records to `out`, one per line,
    /// until `shutdown` fires.
    pub fn run(&mut self, out: &mut dyn WriteColor, shutdown: &Shutdown, interval: Duration) {
        log::debug!("tailing {}", self.path.display());
        loop {
            match self.poll() {
                Ok(records) => {
                    if let Err(err) = emit_all(out, &records) {
                        log::error!("failed to print {} records: {}", records.len(), err);
                    }
                }
                Err(err) => log::error!("{}", err),
            }
            if !shutdown.sleep(interval) {
                break;
            }
        }
        log::debug!("stopped tailing {} at offset {}", self.path.display(), self.cursor);
    }

    fn error(&self, source: io::Error) -> Error {
        Error::Read {
            path: self.path.clone(),
            source,
        }
    }
}

fn emit_all(out: &mut dyn WriteColor, records: &[String]) -> io::Result<()> {
    for record in records {
        emit(out, record)?;
    }
    out.flush()
}

fn emit(out: &mut dyn WriteColor, record: &str) -> io::Result<()> {
    let color = match record.parse().map(Role::of) {
        Ok(Role::Even) => Some(Color::Green),
        Ok(Role::Odd) => Some(Color::Yellow),
        Err(_) => None,
    };
    if let Some(color) = color {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color));
        out.set_color(&spec)?;
        out.write_all(record.as_bytes())?;
        out.reset()?;
    } else {
        out.write_all(record.as_bytes())?;
    }
    writeln!(out)
}
