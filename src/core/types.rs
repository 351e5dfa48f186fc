//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Initiative time unit. Lower initiative acts sooner.
pub type Tick = u32;

/// Unique identifier for combatants (index into the battle roster)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for CombatantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side of the battle a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    GoodGuys,
    BadGuys,
}

impl Team {
    pub fn opponent(&self) -> Team {
        match self {
            Team::GoodGuys => Team::BadGuys,
            Team::BadGuys => Team::GoodGuys,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Team::GoodGuys => "Good Guys",
            Team::BadGuys => "Bad Guys",
        };
        write!(f, "{}", s)
    }
}

/// Grid cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Straight-line distance between cell coordinates
    pub fn distance(&self, other: &Self) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The 4 orthogonal neighbours: south, north, east, west.
    pub fn neighbors(&self) -> [Position; 4] {
        [
            self.offset(0, 1),
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(-1, 0),
        ]
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_opponent() {
        assert_eq!(Team::GoodGuys.opponent(), Team::BadGuys);
        assert_eq!(Team::BadGuys.opponent(), Team::GoodGuys);
    }

    #[test]
    fn test_team_display_names() {
        assert_eq!(Team::GoodGuys.to_string(), "Good Guys");
        assert_eq!(Team::BadGuys.to_string(), "Bad Guys");
    }

    #[test]
    fn test_position_distance_is_euclidean() {
        let a = Position::new(0, 0);
        let b = Position::new(3, 4);
        assert!((a.distance(&b) - 5.0).abs() < f32::EPSILON);
        assert!((b.distance(&a) - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_neighbors_are_orthogonal() {
        let p = Position::new(5, 5);
        for n in p.neighbors() {
            assert!((p.distance(&n) - 1.0).abs() < f32::EPSILON);
        }
        assert!(!p.neighbors().contains(&Position::new(6, 6)));
    }

    #[test]
    fn test_combatant_id_index() {
        assert_eq!(CombatantId::new(3).index(), 3);
        assert_eq!(CombatantId(1), CombatantId::new(1));
    }
}
