//! Combat descriptors and per-combatant state
//!
//! Weapons, armor, items and spells are plain data. `Combatant` holds the
//! mutable state of a single fighter. Anything that involves two fighters
//! or the grid is resolved in `battle`.

pub mod abilities;
pub mod armor;
pub mod combatant;
pub mod constants;
pub mod element;
pub mod morale;
pub mod status;
pub mod weapons;

pub use abilities::{ActionCategory, Item, Spell};
pub use armor::Armor;
pub use combatant::{Combatant, TickReport};
pub use element::{elemental_multiplier, Element};
pub use morale::{BreakResult, MoraleState};
pub use status::{StatusEffect, StatusEffects, StatusKind, StatusTick};
pub use weapons::Weapon;
