//! Combatant state
//!
//! A combatant owns its resource pools, scheduling state, equipment,
//! spells, inventory and statuses. Everything here only touches the
//! combatant itself; anything involving the grid or another combatant is
//! resolved by `Battle`.

use serde::{Deserialize, Serialize};

use crate::combat::abilities::{Item, Spell};
use crate::combat::armor::Armor;
use crate::combat::constants::RESISTANCE_FLOOR;
use crate::combat::morale::{BreakResult, MoraleState};
use crate::combat::status::{StatusEffects, StatusKind};
use crate::combat::weapons::Weapon;
use crate::core::types::{CombatantId, Position, Team, Tick};

/// What happened while initiative ticks elapsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Health lost to Burn
    pub burn_damage: i32,
    /// Statuses that wore off, in expiry order
    pub expired: Vec<StatusKind>,
    /// Health reached zero during these ticks
    pub succumbed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    id: CombatantId,
    name: String,
    team: Team,
    max_health: i32,
    health: i32,
    max_mp: i32,
    mp: i32,
    initiative: Tick,
    morale: MoraleState,
    guarding: bool,
    fled: bool,
    weapon: Weapon,
    armor: Armor,
    spells: Vec<Spell>,
    inventory: Vec<Item>,
    statuses: StatusEffects,
    /// `None` while unplaced or after fleeing
    position: Option<Position>,
}

impl Combatant {
    /// New combatant at full health and mana, bare-handed and unarmored
    pub fn new(
        name: impl Into<String>,
        team: Team,
        max_health: i32,
        max_mp: i32,
        initiative: Tick,
        morale: i32,
    ) -> Self {
        let max_health = max_health.max(0);
        let max_mp = max_mp.max(0);
        Self {
            id: CombatantId::default(),
            name: name.into(),
            team,
            max_health,
            health: max_health,
            max_mp,
            mp: max_mp,
            initiative,
            morale: MoraleState::new(morale),
            guarding: false,
            fled: false,
            weapon: Weapon::default(),
            armor: Armor::default(),
            spells: Vec::new(),
            inventory: Vec::new(),
            statuses: StatusEffects::new(),
            position: None,
        }
    }

    // === Identity ===

    pub fn id(&self) -> CombatantId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: CombatantId) {
        self.id = id;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn is_enemy_of(&self, other: &Combatant) -> bool {
        self.team.opponent() == other.team
    }

    // === Resources ===

    pub fn hp(&self) -> i32 {
        self.health
    }

    pub fn max_hp(&self) -> i32 {
        self.max_health
    }

    pub fn mp(&self) -> i32 {
        self.mp
    }

    pub fn max_mp(&self) -> i32 {
        self.max_mp
    }

    pub fn initiative(&self) -> Tick {
        self.initiative
    }

    pub fn morale(&self) -> i32 {
        self.morale.current
    }

    // === Condition ===

    /// Still in the fight: has health and has not fled
    pub fn is_alive(&self) -> bool {
        self.health > 0 && !self.fled
    }

    pub fn is_guarding(&self) -> bool {
        self.guarding
    }

    pub fn has_fled(&self) -> bool {
        self.fled
    }

    pub fn is_broken(&self) -> bool {
        self.morale.is_broken()
    }

    // === Equipment ===

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn armor(&self) -> &Armor {
        &self.armor
    }

    pub fn spells(&self) -> &[Spell] {
        &self.spells
    }

    pub fn inventory(&self) -> &[Item] {
        &self.inventory
    }

    pub fn statuses(&self) -> &StatusEffects {
        &self.statuses
    }

    /// Armor DR minus Acid corrosion, floored at the default resistance floor
    pub fn effective_dr(&self) -> i32 {
        self.effective_dr_floored(RESISTANCE_FLOOR)
    }

    pub fn effective_dr_floored(&self, floor: i32) -> i32 {
        let dr = self.armor.damage_resistance - self.statuses.total_potency(StatusKind::Acid);
        dr.max(floor)
    }

    pub fn equip_weapon(&mut self, weapon: Weapon) {
        self.weapon = weapon;
    }

    pub fn equip_armor(&mut self, armor: Armor) {
        self.armor = armor;
    }

    pub fn learn_spell(&mut self, spell: Spell) {
        self.spells.push(spell);
    }

    /// Add to inventory; an item with the same name merges quantities
    pub fn add_item(&mut self, item: Item) {
        if let Some(existing) = self.inventory.iter_mut().find(|i| i.name == item.name) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            return;
        }
        self.inventory.push(item);
    }

    /// Take one of the item at `index`. Returns a copy of the item.
    pub(crate) fn consume_item(&mut self, index: usize) -> Option<Item> {
        let item = self.inventory.get_mut(index)?;
        if item.quantity == 0 {
            return None;
        }
        item.quantity -= 1;
        Some(item.clone())
    }

    // === Position ===

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub(crate) fn set_position(&mut self, position: Position) {
        self.position = Some(position);
    }

    pub(crate) fn clear_position(&mut self) {
        self.position = None;
    }

    /// Distance between cells, `None` if either side is off the grid
    pub fn distance_to(&self, target: &Combatant) -> Option<f32> {
        match (self.position, target.position) {
            (Some(from), Some(to)) => Some(from.distance(&to)),
            _ => None,
        }
    }

    /// Range check. Always passes when either side is unplaced.
    pub fn check_range(&self, target: &Combatant, range: f32) -> bool {
        self.distance_to(target).map_or(true, |d| d <= range)
    }

    // === Turn management ===

    /// Begin an action cycle. Returns true if a guard was dropped.
    pub fn start_turn(&mut self) -> bool {
        std::mem::replace(&mut self.guarding, false)
    }

    pub fn guard(&mut self) {
        self.guarding = true;
    }

    /// Advance initiative and let `ticks` ticks elapse, one at a time
    pub fn add_ticks(&mut self, ticks: Tick) -> TickReport {
        self.initiative += ticks;

        let was_standing = self.health > 0;
        let mut report = TickReport::default();
        for _ in 0..ticks {
            let tick = self.statuses.tick();
            report.burn_damage += self.lose_health(tick.burn_damage);
            report.expired.extend(tick.expired);
            if self.health == 0 {
                break;
            }
        }
        report.succumbed = was_standing && self.health == 0;
        report
    }

    // === Status changes ===

    pub fn apply_status(&mut self, kind: StatusKind, duration: Tick, potency: i32) -> bool {
        self.statuses.apply(kind, duration, potency)
    }

    /// Subtract health, floored at zero. Returns health actually lost.
    pub fn lose_health(&mut self, amount: i32) -> i32 {
        let lost = amount.max(0).min(self.health);
        self.health -= lost;
        lost
    }

    /// Restore health, capped at max. Returns health actually restored.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let restored = amount.max(0).min(self.max_health - self.health);
        self.health += restored;
        restored
    }

    /// Restore mana, capped at max. Returns mana actually restored.
    pub fn restore_mp(&mut self, amount: i32) -> i32 {
        let restored = amount.max(0).min(self.max_mp - self.mp);
        self.mp += restored;
        restored
    }

    /// Remove mana, floored at zero. Returns mana actually drained.
    pub fn drain_mp(&mut self, amount: i32) -> i32 {
        let drained = amount.max(0).min(self.mp);
        self.mp -= drained;
        drained
    }

    /// Pay a spell cost. Fails without change if mana is short.
    pub(crate) fn spend_mp(&mut self, cost: i32) -> bool {
        if self.mp < cost {
            return false;
        }
        self.mp -= cost.max(0);
        true
    }

    pub fn reduce_morale(&mut self, amount: i32) -> BreakResult {
        self.morale.reduce(amount)
    }

    pub fn regain_morale(&mut self, amount: i32) {
        self.morale.regain(amount);
    }

    /// Leave the battle. The grid cell is vacated by the grid, not here.
    pub fn flee(&mut self) {
        self.fled = true;
        self.position = None;
    }
}
