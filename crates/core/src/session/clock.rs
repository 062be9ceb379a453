//! Shared countdown clock

use serde::{Deserialize, Serialize};

/// A single countdown budget for the whole game, not split per side.
///
/// Time only passes through [`Countdown::tick`]; the clock holds no timer of
/// its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    budget: u32,
    remaining: u32,
}

impl Countdown {
    pub fn new(budget: u32) -> Self {
        Self {
            budget,
            remaining: budget,
        }
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    /// Subtracts elapsed units, stopping at zero; returns what is left
    pub fn tick(&mut self, elapsed: u32) -> u32 {
        self.remaining = self.remaining.saturating_sub(elapsed);
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.budget;
    }
}
