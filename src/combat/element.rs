//! Elements and the elemental multiplier table
//!
//! - Same element on both sides: resisted (50%)
//! - Opposed pair: weakness (200%)
//! - Everything else: neutral (100%)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Element carried by weapons, spells, armor and damage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// No element. Never resists itself.
    None,
    Physical,
    Magical,
    /// Plain armor
    Standard,
    /// Armor that keeps its magical defense
    Naughtium,
    Fire,
    Ice,
    Psi,
    Bio,
    Electricity,
    Earth,
    Wind,
    Poison,
    Acid,
    /// Damage bounced back by poison armor; triggers no elemental rule
    Reflect,
}

impl Element {
    /// The element this one is doubly effective against (and weak to)
    pub fn opposite(&self) -> Option<Element> {
        match self {
            Element::Fire => Some(Element::Ice),
            Element::Ice => Some(Element::Fire),
            Element::Psi => Some(Element::Bio),
            Element::Bio => Some(Element::Psi),
            Element::Electricity => Some(Element::Earth),
            Element::Earth => Some(Element::Electricity),
            Element::Wind => Some(Element::Poison),
            Element::Poison => Some(Element::Wind),
            _ => None,
        }
    }
}

/// Damage multiplier for an attack element hitting a defense element
pub fn elemental_multiplier(attack: Element, defense: Element) -> f32 {
    if attack == defense && attack != Element::None {
        return 0.5;
    }
    if attack.opposite() == Some(defense) {
        return 2.0;
    }
    1.0
}

impl FromStr for Element {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "none" => Ok(Element::None),
            "physical" => Ok(Element::Physical),
            "magical" => Ok(Element::Magical),
            "standard" => Ok(Element::Standard),
            "naughtium" => Ok(Element::Naughtium),
            "fire" => Ok(Element::Fire),
            "ice" => Ok(Element::Ice),
            "psi" => Ok(Element::Psi),
            "bio" => Ok(Element::Bio),
            "electricity" => Ok(Element::Electricity),
            "earth" => Ok(Element::Earth),
            "wind" => Ok(Element::Wind),
            "poison" => Ok(Element::Poison),
            "acid" => Ok(Element::Acid),
            "reflect" => Ok(Element::Reflect),
            other => Err(format!("Unknown element: {}", other)),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Element; 15] = [
        Element::None,
        Element::Physical,
        Element::Magical,
        Element::Standard,
        Element::Naughtium,
        Element::Fire,
        Element::Ice,
        Element::Psi,
        Element::Bio,
        Element::Electricity,
        Element::Earth,
        Element::Wind,
        Element::Poison,
        Element::Acid,
        Element::Reflect,
    ];

    #[test]
    fn test_same_element_resists() {
        for element in ALL {
            let expected = if element == Element::None { 1.0 } else { 0.5 };
            assert_eq!(elemental_multiplier(element, element), expected, "{element}");
        }
    }

    #[test]
    fn test_opposed_pairs_are_symmetric_weaknesses() {
        let pairs = [
            (Element::Fire, Element::Ice),
            (Element::Psi, Element::Bio),
            (Element::Electricity, Element::Earth),
            (Element::Wind, Element::Poison),
        ];
        for (a, b) in pairs {
            assert_eq!(elemental_multiplier(a, b), 2.0);
            assert_eq!(elemental_multiplier(b, a), 2.0);
        }
    }

    #[test]
    fn test_unlisted_pairs_are_neutral() {
        assert_eq!(elemental_multiplier(Element::Physical, Element::Standard), 1.0);
        assert_eq!(elemental_multiplier(Element::Fire, Element::Earth), 1.0);
        assert_eq!(elemental_multiplier(Element::Acid, Element::Poison), 1.0);
        assert_eq!(elemental_multiplier(Element::Reflect, Element::Poison), 1.0);
    }

    #[test]
    fn test_multiplier_symmetric_for_every_pair() {
        for a in ALL {
            for b in ALL {
                assert_eq!(elemental_multiplier(a, b), elemental_multiplier(b, a));
            }
        }
    }

    #[test]
    fn test_element_parsing() {
        assert_eq!("fire".parse::<Element>(), Ok(Element::Fire));
        assert_eq!("Electricity".parse::<Element>(), Ok(Element::Electricity));
        assert_eq!("".parse::<Element>(), Ok(Element::None));
        assert!("plasma".parse::<Element>().is_err());
    }
}
