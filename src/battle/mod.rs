//! Battle system - turn-based grid combat
//!
//! A `Battle` owns the combatants, the grid and the initiative order.
//! Combatants act when their initiative is lowest, and every action pushes
//! their initiative back by its tick cost.

pub mod events;
pub mod manager;
pub mod resolution;
pub mod roster;
pub mod scenario;
pub mod state;
pub mod tactics;

// Re-exports for convenient access
pub use events::{BattleEvent, BattleEventLog, BattleEventType};
pub use manager::{BattleManager, BattleOutcome};
pub use resolution::AttackReport;
pub use roster::Roster;
pub use scenario::skirmish;
pub use state::{Action, Battle};
pub use tactics::{auto_battle, greedy_turn, nearest_enemy, panic_turn, play_turn};
