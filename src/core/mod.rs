pub mod config;
pub mod error;
pub mod types;

pub use config::{ActionCosts, BattleConfig, CombatRules};
pub use error::{ActionError, ConfigError};
pub use types::{CombatantId, Position, Team, Tick};
