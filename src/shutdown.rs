use crate::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

/// One-shot stop signal shared by the long-running loops.
///
/// Nothing triggers it in a default run, which then keeps going until the
/// process is killed.
pub struct Shutdown {
    triggered: Mutex<bool>,
    cond: Condvar,
}

#[cfg(test)]
struct _Test
where
    Shutdown: Send + Sync;

impl Shutdown {
    pub fn new() -> Self {
        Shutdown {
            triggered: Mutex::new(false),
            cond: Condvar::new(),
        }
    }

    pub fn trigger(&self) {
        *self.triggered.lock() = true;
        self.cond.notify_all();
    }

    pub fn is_triggered(&self) -> bool {
        *self.triggered.lock()
    }

    /// Sleeps for `duration` unless the signal fires first.
    ///
    /// Returns `false` if the signal has fired, `true` if the full duration
    /// elapsed and the caller should keep going.
    pub fn sleep(&self, duration: Duration) -> bool {
        let deadline = Instant::now() + duration;
        let mut triggered = self.triggered.lock();
        while !*triggered {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            triggered = self.cond.wait_timeout(triggered, deadline - now).0;
        }
        false
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Shutdown::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn sleep_runs_out() {
        let shutdown = Shutdown::new();
        let start = Instant::now();
        assert!(shutdown.sleep(Duration::from_millis(20)));
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn trigger_interrupts_sleep() {
        let shutdown = Shutdown::new();
        thread::scope(|scope| {
            let sleeper = scope.spawn(|| shutdown.sleep(Duration::from_secs(60)));
            thread::sleep(Duration::from_millis(20));
            shutdown.trigger();
            assert!(!sleeper.join().unwrap());
        });
        assert!(shutdown.is_triggered());
        assert!(!shutdown.sleep(Duration::from_secs(60)));
    }
}
