//! Battle configuration with documented constants
//!
//! Defaults mirror `combat::constants`. A TOML file may override any subset
//! of values; missing keys keep their defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::core::error::ConfigError;
use crate::core::types::Tick;

/// Tick cost charged for each kind of action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionCosts {
    /// Cost of a single-cell step (also the cost of waiting)
    pub move_base: Tick,
    /// Extra cost when stepping away from an adjacent living enemy
    pub move_penalty: Tick,
    pub guard: Tick,
    pub item: Tick,
    pub spell: Tick,
    pub attack: Tick,
}

impl Default for ActionCosts {
    fn default() -> Self {
        Self {
            move_base: COST_MOVE_BASE,
            move_penalty: COST_MOVE_PENALTY,
            guard: COST_GUARD,
            item: COST_ITEM,
            spell: COST_SPELL,
            attack: COST_ATTACK,
        }
    }
}

impl ActionCosts {
    /// Cost of a step, with or without disengaging from melee
    pub fn movement(&self, engaged: bool) -> Tick {
        if engaged {
            self.move_base + self.move_penalty
        } else {
            self.move_base
        }
    }
}

/// Numbers used by the damage pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatRules {
    /// Lower bound of the physical damage roll (tenths of attack)
    pub damage_roll_min: i32,
    /// Upper bound of the physical damage roll (tenths of attack)
    pub damage_roll_max: i32,
    /// Probability that a landed hit is critical
    pub crit_chance: f32,
    /// Floor for damage resistance and magical defense
    pub resistance_floor: i32,
    /// DR added while guarding
    pub guard_bonus: i32,
    pub burn_ticks: Tick,
    pub burn_divisor: i32,
    pub acid_ticks: Tick,
    pub acid_divisor: i32,
    /// Initiative ticks added per point of Ice damage (rounded up)
    pub ice_stagger_factor: f32,
    pub leech_divisor: i32,
    pub reflect_divisor: i32,
    pub shock_drain_divisor: i32,
    /// Morale regained by a broken combatant that retreats a step
    pub panic_morale_regain: i32,
}

impl Default for CombatRules {
    fn default() -> Self {
        Self {
            damage_roll_min: DAMAGE_ROLL_MIN,
            damage_roll_max: DAMAGE_ROLL_MAX,
            crit_chance: CRIT_CHANCE,
            resistance_floor: RESISTANCE_FLOOR,
            guard_bonus: GUARD_DR_BONUS,
            burn_ticks: BURN_TICKS,
            burn_divisor: BURN_DIVISOR,
            acid_ticks: ACID_TICKS,
            acid_divisor: ACID_DIVISOR,
            ice_stagger_factor: ICE_STAGGER_FACTOR,
            leech_divisor: LEECH_DIVISOR,
            reflect_divisor: REFLECT_DIVISOR,
            shock_drain_divisor: SHOCK_DRAIN_DIVISOR,
            panic_morale_regain: PANIC_MORALE_REGAIN,
        }
    }
}

/// Complete battle configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    pub costs: ActionCosts,
    pub rules: CombatRules,
}

impl BattleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: BattleConfig = toml::from_str(contents)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<(), String> {
        let costs = &self.costs;
        if costs.move_base == 0
            || costs.guard == 0
            || costs.item == 0
            || costs.spell == 0
            || costs.attack == 0
        {
            // A zero cost would let an actor keep the lowest initiative forever
            return Err("Action costs must be positive".into());
        }

        let rules = &self.rules;
        if rules.damage_roll_min > rules.damage_roll_max {
            return Err(format!(
                "damage_roll_min ({}) should be <= damage_roll_max ({})",
                rules.damage_roll_min, rules.damage_roll_max
            ));
        }

        if !(0.0..=1.0).contains(&rules.crit_chance) {
            return Err(format!("crit_chance ({}) must be within [0, 1]", rules.crit_chance));
        }

        if rules.resistance_floor <= -100 {
            return Err(format!(
                "resistance_floor ({}) must be above -100",
                rules.resistance_floor
            ));
        }

        if rules.burn_divisor <= 0
            || rules.acid_divisor <= 0
            || rules.leech_divisor <= 0
            || rules.reflect_divisor <= 0
            || rules.shock_drain_divisor <= 0
        {
            return Err("Divisors must be positive".into());
        }

        Ok(())
    }
}
