use crate::error::{Error, Result};
use crate::gate::TurnGate;
use crate::producer::Producer;
use crate::role::Role;
use crate::shutdown::Shutdown;
use crate::sink::{FileSink, Sink};
use crate::tail::TailReader;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use termcolor::{ColorChoice, StandardStream};

/// Settings for a full run. By default records go to `numbers.txt` in the
/// working directory and the reader polls every 500 ms.
#[derive(Clone, Debug)]
pub struct Config {
    /// Backing store shared by both producers and the tail reader.
    pub path: PathBuf,
    /// Delay between tail reader polls.
    pub poll_interval: Duration,
    /// Coloring of printed records. Forced off when stdout is not a terminal.
    pub color: ColorChoice,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            path: PathBuf::from("numbers.txt"),
            poll_interval: Duration::from_millis(500),
            color: ColorChoice::Auto,
        }
    }
}

impl Config {
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }
}

/// Handle to the three loops started by [`start`].
pub struct Running {
    gate: Arc<TurnGate>,
    shutdown: Arc<Shutdown>,
    threads: Vec<JoinHandle<()>>,
}

/// Starts the even producer, the odd producer, and the tail reader, each on
/// its own thread.
///
/// The loops run until [`Running::stop`] is called. Printed records go to
/// stdout.
pub fn start(config: Config) -> Result<Running> {
    let gate = Arc::new(TurnGate::new());
    let shutdown = Arc::new(Shutdown::new());
    let file = FileSink::new(config.path);
    let mut reader = TailReader::new(file.path());
    let sink: Arc<dyn Sink> = Arc::new(file);

    let mut running = Running {
        gate,
        shutdown,
        threads: Vec::new(),
    };

    for (name, role) in [("even-producer", Role::Even), ("odd-producer", Role::Odd)] {
        let mut producer = Producer::new(role, running.gate.clone(), sink.clone());
        running.spawn(name, move || producer.run())?;
    }

    let color = if io::stdout().is_terminal() {
        config.color
    } else {
        ColorChoice::Never
    };
    let shutdown = running.shutdown.clone();
    let interval = config.poll_interval;
    running.spawn("tail-reader", move || {
        let mut stdout = StandardStream::stdout(color);
        reader.run(&mut stdout, &shutdown, interval);
    })?;

    Ok(running)
}

impl Running {
    fn spawn(&mut self, name: &'static str, f: impl FnOnce() + Send + 'static) -> Result<()> {
        match thread::Builder::new().name(name.to_owned()).spawn(f) {
            Ok(handle) => {
                self.threads.push(handle);
                Ok(())
            }
            Err(source) => {
                self.halt();
                Err(Error::Spawn { name, source })
            }
        }
    }

    /// Blocks until every loop has returned. Without a call to `stop` from
    /// elsewhere, that is never.
    pub fn join(self) {
        for handle in self.threads {
            let name = handle.thread().name().unwrap_or("worker").to_owned();
            if handle.join().is_err() {
                log::error!("{} thread panicked", name);
            }
        }
    }

    /// Stops all three loops and waits for them to finish.
    pub fn stop(self) {
        self.halt();
        self.join();
    }

    fn halt(&self) {
        self.shutdown.trigger();
        self.gate.close();
    }
}
