//! Morale
//!
//! Morale is a signed pool. Below zero the combatant is broken and spends
//! its turns fleeing instead of fighting. Psi damage drains it directly.

use serde::{Deserialize, Serialize};

/// Morale break result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakResult {
    /// Holding steady
    Holding,
    /// Broken - will flee
    Breaking,
}

/// Morale state for a combatant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoraleState {
    pub current: i32,
}

impl MoraleState {
    pub fn new(current: i32) -> Self {
        Self { current }
    }

    /// Lose morale. Unclamped.
    pub fn reduce(&mut self, amount: i32) -> BreakResult {
        self.current -= amount;
        self.check_break()
    }

    /// Regain morale. Unclamped.
    pub fn regain(&mut self, amount: i32) {
        self.current += amount;
    }

    pub fn check_break(&self) -> BreakResult {
        if self.current < 0 {
            BreakResult::Breaking
        } else {
            BreakResult::Holding
        }
    }

    pub fn is_broken(&self) -> bool {
        self.check_break() == BreakResult::Breaking
    }
}
