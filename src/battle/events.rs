//! Battle event stream
//!
//! Every observable state change is recorded as a typed event with a
//! human-readable description. Events are mirrored to `tracing` at debug
//! level as they are pushed.

use serde::{Deserialize, Serialize};

use crate::battle::manager::BattleOutcome;
use crate::combat::element::Element;
use crate::combat::status::StatusKind;
use crate::core::types::{CombatantId, Position, Tick};

/// Log entry for battle events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleEvent {
    /// Turn number the event happened in (0 = setup)
    pub turn: u32,
    pub event_type: BattleEventType,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEventType {
    BattleStarted,
    TurnStarted { actor: CombatantId },
    InitiativeTie { initiative: Tick, tied: Vec<CombatantId>, chosen: CombatantId },
    GuardDropped { id: CombatantId },
    Guarded { id: CombatantId },
    Waited { id: CombatantId },
    Moved { id: CombatantId, from: Position, to: Position, ticks: Tick },
    MoveBlocked { id: CombatantId },
    Fled { id: CombatantId },
    Panicked { id: CombatantId },
    Attacked { attacker: CombatantId, target: CombatantId },
    Missed { attacker: CombatantId, target: CombatantId, swing: u32 },
    CriticalHit { attacker: CombatantId, target: CombatantId },
    ElementalHit { target: CombatantId, multiplier: f32 },
    SpellCast { caster: CombatantId, target: CombatantId, spell: String },
    ItemUsed { user: CombatantId, target: CombatantId, item: String },
    Damaged { id: CombatantId, amount: i32, element: Element, remaining: i32 },
    Reflected { source: CombatantId, amount: i32 },
    StatusApplied { id: CombatantId, kind: StatusKind, ticks: Tick, potency: i32 },
    StatusExpired { id: CombatantId, kind: StatusKind },
    Burned { id: CombatantId, amount: i32 },
    Chilled { id: CombatantId, ticks: Tick },
    Healed { id: CombatantId, amount: i32 },
    ManaRestored { id: CombatantId, amount: i32 },
    ManaDrained { id: CombatantId, amount: i32 },
    Buffed { id: CombatantId },
    Debuffed { id: CombatantId },
    MoraleLost { id: CombatantId, amount: i32 },
    MoraleBroken { id: CombatantId, morale: i32 },
    MoraleRegained { id: CombatantId, amount: i32 },
    Defeated { id: CombatantId },
    BattleEnded { outcome: BattleOutcome },
}

/// Ordered log of everything that happened in a battle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event_type: BattleEventType, description: String, turn: u32) {
        tracing::debug!(turn, "{}", description);
        self.events.push(BattleEvent {
            turn,
            event_type,
            description,
        });
    }

    /// Take all events recorded so far
    pub fn drain(&mut self) -> Vec<BattleEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn iter(&self) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events matching a predicate on their type
    pub fn count_where(&self, pred: impl Fn(&BattleEventType) -> bool) -> usize {
        self.events.iter().filter(|e| pred(&e.event_type)).count()
    }
}
