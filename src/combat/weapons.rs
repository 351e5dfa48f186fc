//! Weapon descriptors
//!
//! A weapon fixes everything about a physical attack: base attack, accuracy,
//! reach, number of swings per action and the element of the blows.

use serde::{Deserialize, Serialize};

use crate::combat::element::Element;

/// Complete weapon properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub physical_attack: i32,
    /// Base hit chance before the target's evasion (1.0 = always hits)
    pub accuracy: f32,
    /// Maximum straight-line distance in cells
    pub range: f32,
    /// Swings per attack action
    pub number_of_attacks: u32,
    pub element: Element,
}

impl Default for Weapon {
    /// Bare hands
    fn default() -> Self {
        Self::fists()
    }
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        physical_attack: i32,
        accuracy: f32,
        range: f32,
        number_of_attacks: u32,
        element: Element,
    ) -> Self {
        Self {
            name: name.into(),
            physical_attack,
            accuracy,
            range,
            number_of_attacks,
            element,
        }
    }

    /// Unarmed
    pub fn fists() -> Self {
        Self::new("Fists", 1, 1.0, 1.0, 1, Element::Physical)
    }

    /// Common weapon: Iron Sword
    pub fn iron_sword() -> Self {
        Self::new("Iron Sword", 50, 0.9, 1.5, 1, Element::Physical)
    }

    /// Common weapon: Wooden Staff
    pub fn wooden_staff() -> Self {
        Self::new("Wooden Staff", 20, 0.67, 1.5, 1, Element::Magical)
    }

    /// Common weapon: Wood Bow
    pub fn wood_bow() -> Self {
        Self::new("Wood Bow", 40, 0.5, 11.0, 1, Element::Physical)
    }
}
