//! Timed status effects
//!
//! Statuses tick down once per elapsed initiative tick and disappear at zero.
//! Instances of the same kind stack independently.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::types::Tick;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusKind {
    /// Potency is lost as health every tick
    Burn,
    /// Potency is subtracted from armor damage resistance
    Acid,
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusKind,
    /// Always positive while the effect is active
    pub remaining_ticks: Tick,
    pub potency: i32,
}

/// Outcome of a single elapsed tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTick {
    /// Sum of Burn potencies active during the tick
    pub burn_damage: i32,
    /// Effects that ran out on this tick
    pub expired: Vec<StatusKind>,
}

/// Active status effects on a combatant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusEffects {
    effects: Vec<StatusEffect>,
}

impl StatusEffects {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an effect. Zero-length effects are ignored.
    pub fn apply(&mut self, kind: StatusKind, duration: Tick, potency: i32) -> bool {
        if duration == 0 {
            return false;
        }
        self.effects.push(StatusEffect {
            kind,
            remaining_ticks: duration,
            potency,
        });
        true
    }

    /// Combined potency of every active effect of `kind`
    pub fn total_potency(&self, kind: StatusKind) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.potency)
            .sum()
    }

    pub fn has(&self, kind: StatusKind) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }

    /// Elapse one tick: collect burn damage, then count every effect down
    pub fn tick(&mut self) -> StatusTick {
        let burn_damage = self.total_potency(StatusKind::Burn);

        let mut expired = Vec::new();
        self.effects.retain_mut(|effect| {
            effect.remaining_ticks -= 1;
            if effect.remaining_ticks == 0 {
                expired.push(effect.kind);
                false
            } else {
                true
            }
        });

        StatusTick { burn_damage, expired }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusEffect> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}
