use crate::role::Role;
use crate::sync::{Condvar, Mutex};
use std::fmt::{self, Debug};
use std::sync::MutexGuard;

/// Strict alternation between the [`Role::Even`] and [`Role::Odd`] writers.
///
/// A role calls [`acquire`] and blocks until it is that role's turn. The
/// returned [`Turn`] is an exclusive critical section; dropping it hands the
/// turn to the partner role and wakes only the partner. The even role always
/// goes first.
///
/// [`acquire`]: TurnGate::acquire
///
/// ```
/// use std::sync::Mutex;
/// use std::thread;
/// use tandem::{Role, TurnGate};
///
/// let gate = TurnGate::new();
/// let log = Mutex::new(Vec::new());
///
/// thread::scope(|scope| {
///     for role in [Role::Odd, Role::Even] {
///         let gate = &gate;
///         let log = &log;
///         scope.spawn(move || {
///             for _ in 0..3 {
///                 let turn = gate.acquire(role).unwrap();
///                 log.lock().unwrap().push(turn.role());
///             }
///         });
///     }
/// });
///
/// let log = log.into_inner().unwrap();
/// assert_eq!(log, [Role::Even, Role::Odd, Role::Even, Role::Odd, Role::Even, Role::Odd]);
/// ```
pub struct TurnGate {
    state: Mutex<State>,
    even: Condvar,
    odd: Condvar,
}

#[cfg(test)]
struct _Test
where
    TurnGate: Send + Sync;

struct State {
    turn: Role,
    closed: bool,
}

impl TurnGate {
    pub fn new() -> Self {
        TurnGate {
            state: Mutex::new(State {
                turn: Role::Even,
                closed: false,
            }),
            even: Condvar::new(),
            odd: Condvar::new(),
        }
    }

    /// Blocks until it is `role`'s turn.
    ///
    /// Returns `None` if the gate has been closed, either before the call or
    /// while waiting.
    pub fn acquire(&self, role: Role) -> Option<Turn<'_>> {
        let mut state = self.state.lock();
        loop {
            if state.closed {
                return None;
            }
            if state.turn == role {
                return Some(Turn {
                    gate: self,
                    state,
                    role,
                });
            }
            state = self.signal(role).wait(state);
        }
    }

    /// Role whose turn it currently is.
    pub fn current(&self) -> Role {
        self.state.lock().turn
    }

    /// Wakes every waiter and makes all subsequent `acquire` calls return
    /// `None`. A turn already held is unaffected until it is dropped.
    pub fn close(&self) {
        let mut state = self.state.lock();
        state.closed = true;
        self.even.notify_all();
        self.odd.notify_all();
        drop(state);
        log::debug!("turn gate closed");
    }

    fn signal(&self, role: Role) -> &Condvar {
        match role {
            Role::Even => &self.even,
            Role::Odd => &self.odd,
        }
    }
}

impl Default for TurnGate {
    fn default() -> Self {
        TurnGate::new()
    }
}

impl Debug for TurnGate {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        let state = self.state.lock();
        formatter
            .debug_struct("TurnGate")
            .field("turn", &state.turn)
            .field("closed", &state.closed)
            .finish()
    }
}

/// Exclusive critical section of one role, obtained from [`TurnGate::acquire`].
///
/// Dropping the turn flips the gate to the other role and wakes it, so the
/// partner is released on every exit path, including errors and panics.
pub struct Turn<'a> {
    gate: &'a TurnGate,
    state: MutexGuard<'a, State>,
    role: Role,
}

impl<'a> Turn<'a> {
    /// Role holding this turn.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Hands the turn to the partner role. Equivalent to dropping the turn.
    pub fn pass(self) {}
}

impl<'a> Debug for Turn<'a> {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.debug_tuple("Turn").field(&self.role).finish()
    }
}

impl<'a> Drop for Turn<'a> {
    fn drop(&mut self) {
        let next = self.role.other();
        self.state.turn = next;
        // The guard is released after this body, so the woken role rechecks
        // the flag only once the flip is visible.
        self.gate.signal(next).notify_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn even_goes_first() {
        let gate = TurnGate::new();
        assert_eq!(gate.current(), Role::Even);
        gate.acquire(Role::Even).unwrap().pass();
        assert_eq!(gate.current(), Role::Odd);
        drop(gate.acquire(Role::Odd).unwrap());
        assert_eq!(gate.current(), Role::Even);
    }

    #[test]
    fn odd_waits_for_even() {
        let gate = TurnGate::new();
        let (tx, rx) = mpsc::channel();

        thread::scope(|scope| {
            let gate = &gate;
            scope.spawn(move || {
                let turn = gate.acquire(Role::Odd).unwrap();
                tx.send(turn.role()).unwrap();
            });

            assert!(rx.recv_timeout(Duration::from_millis(50)).is_err());
            gate.acquire(Role::Even).unwrap().pass();
            assert_eq!(rx.recv().unwrap(), Role::Odd);
        });

        assert_eq!(gate.current(), Role::Even);
    }

    #[test]
    fn close_releases_waiters() {
        let gate = TurnGate::new();

        thread::scope(|scope| {
            let waiter = scope.spawn(|| gate.acquire(Role::Odd).is_none());
            thread::sleep(Duration::from_millis(20));
            gate.close();
            assert!(waiter.join().unwrap());
        });

        assert!(gate.acquire(Role::Even).is_none());
        assert!(gate.acquire(Role::Odd).is_none());
    }

    #[test]
    fn panic_inside_turn_still_flips() {
        let gate = TurnGate::new();
        thread::scope(|scope| {
            let _ = scope
                .spawn(|| {
                    let _turn = gate.acquire(Role::Even).unwrap();
                    panic!("write blew up");
                })
                .join();
        });
        assert_eq!(gate.acquire(Role::Odd).unwrap().role(), Role::Odd);
    }
}
