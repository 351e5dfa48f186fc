//! Combatant arena
//!
//! The roster owns every combatant in a battle. Ids are indices into the
//! arena and are never reused; fallen and fled combatants stay in place.

use serde::{Deserialize, Serialize};

use crate::combat::combatant::Combatant;
use crate::core::error::{ActionError, Result};
use crate::core::types::{CombatantId, Team};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    combatants: Vec<Combatant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a combatant and assign its id
    pub fn add(&mut self, mut combatant: Combatant) -> CombatantId {
        let id = CombatantId::new(self.combatants.len() as u32);
        combatant.set_id(id);
        self.combatants.push(combatant);
        id
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.combatants.get(id.index())
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.combatants.get_mut(id.index())
    }

    pub fn require(&self, id: CombatantId) -> Result<&Combatant> {
        self.get(id).ok_or(ActionError::UnknownCombatant(id))
    }

    pub fn require_mut(&mut self, id: CombatantId) -> Result<&mut Combatant> {
        self.get_mut(id).ok_or(ActionError::UnknownCombatant(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter()
    }

    pub fn living(&self) -> impl Iterator<Item = &Combatant> {
        self.combatants.iter().filter(|c| c.is_alive())
    }

    /// Living members of one team
    pub fn living_on(&self, team: Team) -> impl Iterator<Item = &Combatant> {
        self.living().filter(move |c| c.team() == team)
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        let mut roster = Roster::new();
        roster.add(Combatant::new("Dwayne", Team::GoodGuys, 200, 0, 5, 100));
        roster.add(Combatant::new("Goblin", Team::BadGuys, 90, 0, 9, 40));
        roster.add(Combatant::new("Elizabeth", Team::GoodGuys, 100, 75, 7, 70));
        roster
    }

    #[test]
    fn test_ids_are_sequential() {
        let roster = roster();
        let names: Vec<_> = roster.iter().map(|c| (c.id().0, c.name().to_string())).collect();
        assert_eq!(names[0], (0, "Dwayne".to_string()));
        assert_eq!(names[2], (2, "Elizabeth".to_string()));
    }

    #[test]
    fn test_require_unknown() {
        let roster = roster();
        assert_eq!(
            roster.require(CombatantId(9)).err(),
            Some(ActionError::UnknownCombatant(CombatantId(9)))
        );
    }

    #[test]
    fn test_living_on_team() {
        let mut roster = roster();
        roster.get_mut(CombatantId(0)).unwrap().lose_health(500);
        let good: Vec<_> = roster.living_on(Team::GoodGuys).map(|c| c.name()).collect();
        assert_eq!(good, vec!["Elizabeth"]);
        assert_eq!(roster.living().count(), 2);
    }
}
