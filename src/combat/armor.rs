//! Armor descriptors
//!
//! Some armor properties only exist on armor of the matching element:
//! evasion needs Wind, damage threshold needs Earth, and magical defense
//! needs Naughtium. `Armor::new` zeroes the others.

use serde::{Deserialize, Serialize};

use crate::combat::element::Element;

/// Complete armor properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Armor {
    pub name: String,
    /// Percentage-like mitigation: damage * 100 / (100 + DR)
    pub damage_resistance: i32,
    /// Flat reduction applied before resistance
    pub damage_threshold: i32,
    /// Subtracted from the attacker's accuracy
    pub evasion: f32,
    pub element: Element,
    /// Resistance against spells
    pub magical_defense: i32,
}

impl Default for Armor {
    /// Unarmored
    fn default() -> Self {
        Self::naked()
    }
}

impl Armor {
    pub fn new(
        name: impl Into<String>,
        damage_resistance: i32,
        damage_threshold: i32,
        evasion: f32,
        element: Element,
        magical_defense: i32,
    ) -> Self {
        Self {
            name: name.into(),
            damage_resistance,
            damage_threshold: if element == Element::Earth { damage_threshold } else { 0 },
            evasion: if element == Element::Wind { evasion } else { 0.0 },
            element,
            magical_defense: if element == Element::Naughtium { magical_defense } else { 0 },
        }
    }

    /// No armor at all
    pub fn naked() -> Self {
        Self {
            name: "Naked".into(),
            damage_resistance: 0,
            damage_threshold: 0,
            evasion: 0.0,
            element: Element::Standard,
            magical_defense: 0,
        }
    }

    /// Heavy armor (iron)
    pub fn iron() -> Self {
        Self::new("Iron Armor", 40, 0, 0.0, Element::Standard, 0)
    }

    /// Light armor (cloth)
    pub fn cloth() -> Self {
        Self::new("Cloth Armor", 10, 0, 0.0, Element::Magical, 0)
    }

    /// Medium armor (wood)
    pub fn wooden() -> Self {
        Self::new("Wooden Armor", 20, 0, 0.0, Element::Standard, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_naked() {
        let armor = Armor::default();
        assert_eq!(armor.name, "Naked");
        assert_eq!(armor.damage_resistance, 0);
        assert_eq!(armor.element, Element::Standard);
    }

    #[test]
    fn test_element_gated_properties_zeroed() {
        let armor = Armor::new("Odd Plate", 30, 5, 0.4, Element::Standard, 25);
        assert_eq!(armor.damage_resistance, 30);
        assert_eq!(armor.damage_threshold, 0);
        assert_eq!(armor.evasion, 0.0);
        assert_eq!(armor.magical_defense, 0);
    }

    #[test]
    fn test_element_gated_properties_kept() {
        assert_eq!(Armor::new("Stone Mail", 10, 5, 0.0, Element::Earth, 0).damage_threshold, 5);
        assert_eq!(Armor::new("Windweave", 10, 0, 0.3, Element::Wind, 0).evasion, 0.3);
        assert_eq!(
            Armor::new("Naughtium Robe", 10, 0, 0.0, Element::Naughtium, 40).magical_defense,
            40
        );
    }
}
