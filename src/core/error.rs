use thiserror::Error;

use crate::core::types::CombatantId;

/// Why an action was rejected. A rejected action leaves state untouched
/// unless the variant says otherwise.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Combatant not found: {0}")]
    UnknownCombatant(CombatantId),

    #[error("{0} is down or has fled and cannot act")]
    ActorDown(CombatantId),

    #[error("{0} is down or has fled and cannot be targeted")]
    InvalidTarget(CombatantId),

    #[error("Target out of range ({distance:.2} > {range:.2})")]
    OutOfRange { range: f32, distance: f32 },

    #[error("Invalid spell selection: {0}")]
    InvalidSpell(usize),

    #[error("Not enough MP (cost: {cost}, have: {available})")]
    InsufficientMana { cost: i32, available: i32 },

    /// The spell's mana has already been spent when this is returned.
    #[error("Spell target {0} is not on the grid")]
    TargetUnplaced(CombatantId),

    #[error("Invalid item selection: {0}")]
    InvalidItem(usize),

    #[error("No {0} left")]
    OutOfStock(String),

    #[error("Movement blocked")]
    Blocked,
}

/// Configuration loading failures
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ActionError>;
