//! Combat system constants - all tunable values in one place
//!
//! These are the defaults behind `BattleConfig`. Tick costs are charged
//! into the actor's initiative; lower initiative acts sooner.

use crate::core::types::Tick;

// Tick costs per action
pub const COST_MOVE_BASE: Tick = 1;
pub const COST_MOVE_PENALTY: Tick = 6;
pub const COST_GUARD: Tick = 2;
pub const COST_ITEM: Tick = 3;
pub const COST_SPELL: Tick = 4;
pub const COST_ATTACK: Tick = 6;

// Physical damage roll: attack * U(MIN..=MAX) / 10
pub const DAMAGE_ROLL_MIN: i32 = 7;
pub const DAMAGE_ROLL_MAX: i32 = 13;
pub const DAMAGE_ROLL_DIVISOR: i32 = 10;
pub const CRIT_CHANCE: f32 = 0.05;

// Resistance
pub const RESISTANCE_FLOOR: i32 = -80;
pub const GUARD_DR_BONUS: i32 = 100;

// Elemental riders
pub const BURN_TICKS: Tick = 5;
pub const BURN_DIVISOR: i32 = 20;
pub const ACID_TICKS: Tick = 7;
pub const ACID_DIVISOR: i32 = 3;
pub const ICE_STAGGER_FACTOR: f32 = 0.01;
pub const LEECH_DIVISOR: i32 = 2;
pub const REFLECT_DIVISOR: i32 = 2;
pub const SHOCK_DRAIN_DIVISOR: i32 = 2;

// Morale
pub const PANIC_MORALE_REGAIN: i32 = 2;
