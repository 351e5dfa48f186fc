//! Initiative scheduling and victory checks
//!
//! The manager keeps the list of participants. The next actor is the living
//! participant with the lowest initiative; ties are broken uniformly at
//! random from the battle's random source.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::battle::roster::Roster;
use crate::core::types::{CombatantId, Team};

/// Result of a victory check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattleOutcome {
    /// More than one team still standing
    #[default]
    Undecided,
    /// Nobody left standing
    Draw,
    Victory(Team),
}

impl BattleOutcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, BattleOutcome::Undecided)
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleOutcome::Undecided => write!(f, "Undecided"),
            BattleOutcome::Draw => write!(f, "Draw"),
            BattleOutcome::Victory(team) => write!(f, "{} win", team),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleManager {
    participants: Vec<CombatantId>,
}

impl BattleManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a participant. Duplicates are rejected.
    pub fn add_participant(&mut self, id: CombatantId) -> bool {
        if self.participants.contains(&id) {
            return false;
        }
        self.participants.push(id);
        true
    }

    pub fn participants(&self) -> &[CombatantId] {
        &self.participants
    }

    /// Living participants sharing the lowest initiative, in join order
    pub fn lowest_initiative(&self, roster: &Roster) -> Vec<CombatantId> {
        let living = self
            .participants
            .iter()
            .filter_map(|&id| roster.get(id))
            .filter(|c| c.is_alive());

        let mut tied = Vec::new();
        let mut lowest = None;
        for combatant in living {
            let init = combatant.initiative();
            match lowest {
                Some(current) if init > current => {}
                Some(current) if init == current => tied.push(combatant.id()),
                _ => {
                    lowest = Some(init);
                    tied.clear();
                    tied.push(combatant.id());
                }
            }
        }
        tied
    }

    /// Pick the next actor. `None` when nobody is alive.
    pub fn next_active<R: Rng + ?Sized>(&self, roster: &Roster, rng: &mut R) -> Option<CombatantId> {
        let tied = self.lowest_initiative(roster);
        tied.choose(rng).copied()
    }

    pub fn winner(&self, roster: &Roster) -> BattleOutcome {
        let standing = |team: Team| {
            roster
                .living_on(team)
                .any(|c| self.participants.contains(&c.id()))
        };

        match (standing(Team::GoodGuys), standing(Team::BadGuys)) {
            (false, false) => BattleOutcome::Draw,
            (true, false) => BattleOutcome::Victory(Team::GoodGuys),
            (false, true) => BattleOutcome::Victory(Team::BadGuys),
            (true, true) => BattleOutcome::Undecided,
        }
    }
}
