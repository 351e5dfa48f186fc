//! Consumable items and spells

use serde::{Deserialize, Serialize};

use crate::combat::element::Element;

/// What an item or spell does to whoever it affects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionCategory {
    Healing,
    RestoreMp,
    Buff,
    Debuff,
    /// Unclassified offensive effect
    Attack,
}

impl ActionCategory {
    /// Area spells of this category hit the caster's team (buffs) or the
    /// opposing team (everything else).
    pub fn targets_allies(&self) -> bool {
        matches!(self, ActionCategory::Buff)
    }
}

/// Stackable consumable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    pub range: f32,
    pub category: ActionCategory,
    pub potency: i32,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        quantity: u32,
        range: f32,
        category: ActionCategory,
        potency: i32,
    ) -> Self {
        Self {
            name: name.into(),
            quantity,
            range,
            category,
            potency,
        }
    }

    pub fn health_potion() -> Self {
        Self::new("Health Potion", 1, 4.0, ActionCategory::Healing, 50)
    }

    pub fn magic_potion() -> Self {
        Self::new("Magic Potion", 1, 4.0, ActionCategory::RestoreMp, 40)
    }
}

/// Area spell centred on its primary target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub magical_attack: i32,
    pub mp_cost: i32,
    /// Maximum distance from caster to primary target
    pub range: f32,
    pub duration: u32,
    pub element: Element,
    /// Radius around the primary target's cell
    pub aoe: i32,
    pub category: ActionCategory,
}

impl Spell {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        magical_attack: i32,
        mp_cost: i32,
        range: f32,
        duration: u32,
        element: Element,
        aoe: i32,
        category: ActionCategory,
    ) -> Self {
        Self {
            name: name.into(),
            magical_attack,
            mp_cost,
            range,
            duration,
            element,
            aoe,
            category,
        }
    }

    pub fn fireball() -> Self {
        Self::new("Fireball", 64, 15, 15.0, 0, Element::Fire, 2, ActionCategory::Debuff)
    }
}
