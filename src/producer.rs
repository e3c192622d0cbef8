use crate::error::Result;
use crate::gate::TurnGate;
use crate::role::Role;
use crate::sink::{self, Sink};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Writer loop for one [`Role`].
///
/// Each step draws a value of the role's parity, waits for the role's turn,
/// appends the value to the sink, and hands the turn over. Two producers with
/// opposite roles sharing a gate and a sink write strictly alternating parity,
/// starting with even.
pub struct Producer {
    role: Role,
    gate: Arc<TurnGate>,
    sink: Arc<dyn Sink>,
    rng: StdRng,
}

impl Producer {
    pub fn new(role: Role, gate: Arc<TurnGate>, sink: Arc<dyn Sink>) -> Self {
        Self::with_rng(role, gate, sink, StdRng::from_entropy())
    }

    /// Producer with a reproducible value sequence.
    pub fn seeded(role: Role, gate: Arc<TurnGate>, sink: Arc<dyn Sink>, seed: u64) -> Self {
        Self::with_rng(role, gate, sink, StdRng::seed_from_u64(seed))
    }

    fn with_rng(role: Role, gate: Arc<TurnGate>, sink: Arc<dyn Sink>, rng: StdRng) -> Self {
        Producer {
            role,
            gate,
            sink,
            rng,
        }
    }

    /// Performs one write turn.
    ///
    /// Returns `None` once the gate is closed. A failed append is returned as
    /// an error, but the turn has been passed on regardless.
    pub fn step(&mut self) -> Option<Result<u32>> {
        let value = self.role.sample(&mut self.rng);
        let turn = self.gate.acquire(self.role)?;
        let result = self.sink.append(&sink::record(value)).map(|()| value);
        turn.pass();
        Some(result)
    }

    /// Writes until the gate is closed, reporting failed appends and moving on.
    pub fn run(&mut self) {
        log::debug!("{} producer started", self.role);
        while let Some(result) = self.step() {
            match result {
                Ok(value) => log::trace!("{} producer wrote {}", self.role, value),
                Err(err) => log::error!("{} producer: {}", self.role, err),
            }
        }
        log::debug!("{} producer stopped", self.role);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io;
    use std::sync::Mutex;
    use std::thread;

    #[derive(Default)]
    struct Memory {
        records: Mutex<Vec<String>>,
    }

    impl Sink for Memory {
        fn append(&self, record: &str) -> Result<()> {
            self.records.lock().unwrap().push(record.to_owned());
            Ok(())
        }
    }

    struct Broken;

    impl Sink for Broken {
        fn append(&self, _record: &str) -> Result<()> {
            Err(Error::Write {
                path: "numbers.txt".into(),
                source: io::Error::new(io::ErrorKind::Other, "disk full"),
            })
        }
    }

    #[test]
    fn alternates_parity() {
        let gate = Arc::new(TurnGate::new());
        let memory = Arc::new(Memory::default());
        let sink: Arc<dyn Sink> = memory.clone();

        thread::scope(|scope| {
            for (role, seed) in [(Role::Odd, 1), (Role::Even, 2)] {
                let mut producer = Producer::seeded(role, gate.clone(), sink.clone(), seed);
                scope.spawn(move || {
                    for _ in 0..50 {
                        producer.step().unwrap().unwrap();
                    }
                });
            }
        });

        let records = memory.records.lock().unwrap();
        assert_eq!(records.len(), 100);
        for (i, record) in records.iter().enumerate() {
            let value: u32 = record.trim_end_matches('\n').parse().unwrap();
            let expected = if i % 2 == 0 { Role::Even } else { Role::Odd };
            assert_eq!(Role::of(value), expected, "record #{} = {}", i, value);
        }
    }

    #[test]
    fn failed_append_still_passes_turn() {
        let gate = Arc::new(TurnGate::new());
        let mut even = Producer::seeded(Role::Even, gate.clone(), Arc::new(Memory::default()), 3);
        let mut odd = Producer::seeded(Role::Odd, gate.clone(), Arc::new(Broken), 4);

        even.step().unwrap().unwrap();
        assert!(matches!(odd.step(), Some(Err(Error::Write { .. }))));
        assert_eq!(gate.current(), Role::Even);
        even.step().unwrap().unwrap();
    }

    #[test]
    fn closed_gate_ends_run() {
        let gate = Arc::new(TurnGate::new());
        gate.close();
        let mut producer = Producer::new(Role::Even, gate, Arc::new(Memory::default()));
        assert!(producer.step().is_none());
        producer.run();
    }
}
