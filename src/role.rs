use rand::Rng;
use std::fmt::{self, Display};

/// One of the two writers taking turns at the gate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    /// Writes even values in `2..=1000`. Goes first.
    Even,
    /// Writes odd values in `1..=999`.
    Odd,
}

impl Role {
    /// The partner role, i.e. whose turn comes next.
    pub fn other(self) -> Role {
        match self {
            Role::Even => Role::Odd,
            Role::Odd => Role::Even,
        }
    }

    /// Classifies a value by its parity.
    pub fn of(value: u32) -> Role {
        if value % 2 == 0 {
            Role::Even
        } else {
            Role::Odd
        }
    }

    /// Draws a uniformly random value of this role's parity from its range.
    pub fn sample<R: Rng>(self, rng: &mut R) -> u32 {
        let base = match self {
            Role::Even => 2,
            Role::Odd => 1,
        };
        rng.gen_range(0..500) * 2 + base
    }
}

impl Display for Role {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str(match self {
            Role::Even => "even",
            Role::Odd => "odd",
        })
    }
}
