//! Grid Tactics - turn-based tactical combat on a grid
//!
//! Combatants take turns in initiative order, moving on a grid and
//! trading blows, spells and items until one team is left standing.

pub mod battle;
pub mod combat;
pub mod core;
pub mod spatial;
