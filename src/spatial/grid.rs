//! Battle grid occupancy
//!
//! Each cell holds at most one combatant id. A combatant's stored position
//! and the grid cell always agree: the grid updates both together.

use serde::{Deserialize, Serialize};

use crate::battle::roster::Roster;
use crate::core::config::ActionCosts;
use crate::core::types::{CombatantId, Position, Tick};

/// Result of a single-step move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovementResult {
    /// Relocated within the grid
    Moved {
        from: Position,
        to: Position,
        ticks: Tick,
        engaged: bool,
    },
    /// Stepped off the edge and left the battle
    Fled {
        from: Position,
        ticks: Tick,
        engaged: bool,
    },
    /// Destination occupied; nothing changed
    Blocked { by: CombatantId },
    /// Mover is not on the grid; nothing changed
    NotPlaced,
}

impl MovementResult {
    /// Tick cost of the move. Zero means nothing happened.
    pub fn ticks(&self) -> Tick {
        match self {
            MovementResult::Moved { ticks, .. } | MovementResult::Fled { ticks, .. } => *ticks,
            MovementResult::Blocked { .. } | MovementResult::NotPlaced => 0,
        }
    }

    pub fn fled(&self) -> bool {
        matches!(self, MovementResult::Fled { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    width: i32,
    height: i32,
    cells: Vec<Option<CombatantId>>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width as i32,
            height: height as i32,
            cells: vec![None; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    #[inline]
    fn index(&self, pos: Position) -> Option<usize> {
        if self.in_bounds(pos) {
            Some((pos.y * self.width + pos.x) as usize)
        } else {
            None
        }
    }

    /// Occupant of a cell. Out of bounds is simply empty.
    pub fn combatant_at(&self, pos: Position) -> Option<CombatantId> {
        self.index(pos).and_then(|i| self.cells[i])
    }

    /// Put a combatant on an empty cell, leaving its previous cell.
    /// Fails for out-of-bounds or occupied cells and for combatants that
    /// are down or fled.
    pub fn place_combatant(&mut self, roster: &mut Roster, id: CombatantId, pos: Position) -> bool {
        let Some(index) = self.index(pos) else {
            return false;
        };
        if self.cells[index].is_some() {
            return false;
        }
        let Some(combatant) = roster.get_mut(id) else {
            return false;
        };
        if !combatant.is_alive() {
            return false;
        }

        if let Some(previous) = combatant.position().and_then(|p| self.index(p)) {
            self.cells[previous] = None;
        }
        self.cells[index] = Some(id);
        combatant.set_position(pos);
        true
    }

    /// Take a combatant off the grid. Its stored position is cleared.
    pub fn remove_combatant(&mut self, roster: &mut Roster, id: CombatantId) {
        let Some(combatant) = roster.get_mut(id) else {
            return;
        };
        if let Some(index) = combatant.position().and_then(|p| self.index(p)) {
            if self.cells[index] == Some(id) {
                self.cells[index] = None;
            }
        }
        combatant.clear_position();
    }

    /// Any living enemy in the four orthogonal neighbours
    pub fn is_engaged(&self, roster: &Roster, id: CombatantId) -> bool {
        let Some(combatant) = roster.get(id) else {
            return false;
        };
        let Some(pos) = combatant.position() else {
            return false;
        };
        pos.neighbors()
            .iter()
            .filter_map(|&n| self.combatant_at(n))
            .filter_map(|other| roster.get(other))
            .any(|other| other.is_alive() && other.is_enemy_of(combatant))
    }

    /// Step by (dx, dy). Leaving the grid means fleeing the battle.
    pub fn move_combatant(
        &mut self,
        roster: &mut Roster,
        id: CombatantId,
        dx: i32,
        dy: i32,
        costs: &ActionCosts,
    ) -> MovementResult {
        let Some(from) = roster.get(id).and_then(|c| c.position()) else {
            return MovementResult::NotPlaced;
        };
        let engaged = self.is_engaged(roster, id);
        let ticks = costs.movement(engaged);
        let to = from.offset(dx, dy);

        if !self.in_bounds(to) {
            self.remove_combatant(roster, id);
            if let Some(combatant) = roster.get_mut(id) {
                combatant.flee();
            }
            return MovementResult::Fled { from, ticks, engaged };
        }

        if let Some(by) = self.combatant_at(to) {
            return MovementResult::Blocked { by };
        }

        if let Some(index) = self.index(from) {
            self.cells[index] = None;
        }
        if let Some(index) = self.index(to) {
            self.cells[index] = Some(id);
        }
        if let Some(combatant) = roster.get_mut(id) {
            combatant.set_position(to);
        }
        MovementResult::Moved { from, to, ticks, engaged }
    }

    /// Occupied cells in row-major order
    pub fn occupants(&self) -> impl Iterator<Item = (Position, CombatantId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            let i = i as i32;
            cell.map(|id| (Position::new(i % width, i / width), id))
        })
    }

    /// Text dump: `[X]` with the occupant's initial, `[ ]` when empty
    pub fn render(&self, roster: &Roster) -> String {
        let mut out = String::with_capacity(self.cells.len() * 3 + self.height as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                let initial = self
                    .combatant_at(Position::new(x, y))
                    .and_then(|id| roster.get(id))
                    .and_then(|c| c.name().chars().next())
                    .unwrap_or(' ');
                out.push('[');
                out.push(initial);
                out.push(']');
            }
            out.push('\n');
        }
        out
    }
}
