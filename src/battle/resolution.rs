//! Action resolution
//!
//! Attacks, spells and items are resolved against the battle as a whole,
//! since elemental riders and poison reflection reach other combatants and
//! the grid.
//!
//! Physical damage per landed swing:
//! 1. product = attack * U{7..=13} / 10
//! 2. critical: the full product, nothing else applies
//! 3. otherwise max(product - DT, 1) * 100 / (100 + DR), scaled by the
//!    elemental multiplier. DR includes Acid corrosion and the guard bonus
//!    and is floored at the resistance floor.

use rand::Rng;

use crate::battle::events::BattleEventType;
use crate::battle::state::Battle;
use crate::combat::abilities::ActionCategory;
use crate::combat::constants::DAMAGE_ROLL_DIVISOR;
use crate::combat::element::{elemental_multiplier, Element};
use crate::combat::morale::BreakResult;
use crate::combat::status::StatusKind;
use crate::combat::weapons::Weapon;
use crate::core::error::{ActionError, Result};
use crate::core::types::{CombatantId, Tick};

/// Summary of a physical attack action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttackReport {
    /// Swings actually taken (the attack stops once the target is down)
    pub swings: u32,
    pub hits: u32,
    pub criticals: u32,
    /// Damage dealt to the target, before reflection
    pub damage: i32,
}

struct Hit {
    damage: i32,
    critical: bool,
}

impl<R: Rng> Battle<R> {
    /// Melee or ranged attack with the equipped weapon
    pub fn attack(&mut self, attacker: CombatantId, target: CombatantId) -> Result<AttackReport> {
        let actor = self.require_actor(attacker)?;
        if attacker == target {
            return Err(ActionError::InvalidTarget(target));
        }
        let victim = self.require_target(target)?;
        let weapon = actor.weapon().clone();
        if !actor.check_range(victim, weapon.range) {
            return Err(ActionError::OutOfRange {
                range: weapon.range,
                distance: actor.distance_to(victim).unwrap_or_default(),
            });
        }

        let description = format!(
            "{} attacks {} with {} ({})!",
            actor.name(),
            victim.name(),
            weapon.name,
            weapon.element
        );
        self.log(BattleEventType::Attacked { attacker, target }, description);

        let mut report = AttackReport::default();
        for swing in 1..=weapon.number_of_attacks {
            if !self.roster.get(target).map_or(false, |c| c.is_alive()) {
                break;
            }
            report.swings += 1;
            match self.swing(attacker, target, &weapon)? {
                Some(hit) => {
                    report.hits += 1;
                    report.damage += hit.damage;
                    if hit.critical {
                        report.criticals += 1;
                    }
                }
                None => {
                    self.log(
                        BattleEventType::Missed { attacker, target, swing },
                        format!("Attack {} MISSED!", swing),
                    );
                }
            }
        }
        Ok(report)
    }

    fn swing(&mut self, attacker: CombatantId, target: CombatantId, weapon: &Weapon) -> Result<Option<Hit>> {
        let rules = self.config.rules.clone();
        let victim = self.roster.require(target)?;
        let armor = victim.armor().clone();
        let guarding = victim.is_guarding();
        let resistance = victim.effective_dr_floored(rules.resistance_floor);

        let hit_chance = weapon.accuracy - armor.evasion;
        if self.rng.gen::<f32>() > hit_chance {
            return Ok(None);
        }

        let roll = self.rng.gen_range(rules.damage_roll_min..=rules.damage_roll_max);
        let product = weapon.physical_attack * roll / DAMAGE_ROLL_DIVISOR;
        let critical = self.rng.gen::<f32>() <= rules.crit_chance;

        let damage = if critical {
            self.log(
                BattleEventType::CriticalHit { attacker, target },
                "CRITICAL HIT!".into(),
            );
            product
        } else {
            let after_threshold = (product - armor.damage_threshold).max(1);
            let mut dr = resistance;
            if guarding {
                dr += rules.guard_bonus;
            }
            let dr = dr.max(rules.resistance_floor);
            let base = after_threshold * 100 / (100 + dr);
            let multiplier = elemental_multiplier(weapon.element, armor.element);
            self.log_multiplier(target, multiplier);
            (base as f32 * multiplier) as i32
        };

        // Riders see the mitigated damage; a critical counts as zero there
        let mitigated = if critical { 0 } else { damage };
        self.apply_riders(
            attacker,
            target,
            weapon.element,
            product / rules.burn_divisor,
            mitigated,
        )?;
        self.deal_damage(target, damage, weapon.element)?;

        Ok(Some(Hit { damage, critical }))
    }

    /// Area spell centred on `target`. Returns everyone it affected, in the
    /// order they were hit.
    pub fn cast_spell(
        &mut self,
        caster: CombatantId,
        target: CombatantId,
        spell_index: usize,
    ) -> Result<Vec<CombatantId>> {
        let actor = self.require_actor(caster)?;
        // A fled primary target is caught after the mana is spent
        let primary = self.roster.require(target)?;
        if primary.hp() == 0 {
            return Err(ActionError::InvalidTarget(target));
        }
        let spell = actor
            .spells()
            .get(spell_index)
            .cloned()
            .ok_or(ActionError::InvalidSpell(spell_index))?;

        if actor.mp() < spell.mp_cost {
            return Err(ActionError::InsufficientMana {
                cost: spell.mp_cost,
                available: actor.mp(),
            });
        }
        if !actor.check_range(primary, spell.range) {
            return Err(ActionError::OutOfRange {
                range: spell.range,
                distance: actor.distance_to(primary).unwrap_or_default(),
            });
        }

        let caster_team = actor.team();
        let center = primary.position();
        let description = format!("{} casts {} ({})!", actor.name(), spell.name, spell.element);

        self.roster.require_mut(caster)?.spend_mp(spell.mp_cost);
        self.log(
            BattleEventType::SpellCast {
                caster,
                target,
                spell: spell.name.clone(),
            },
            description,
        );

        // Mana stays spent
        let Some(center) = center else {
            return Err(ActionError::TargetUnplaced(target));
        };

        let rules = self.config.rules.clone();
        let radius = spell.aoe as f32;
        let candidates: Vec<_> = self
            .grid
            .occupants()
            .filter(|(pos, _)| pos.distance(&center) <= radius)
            .collect();

        let mut affected = Vec::new();
        for (pos, id) in candidates {
            // Earlier victims may have died to reflection
            if self.grid.combatant_at(pos) != Some(id) {
                continue;
            }
            let Some(victim) = self.roster.get(id).filter(|c| c.is_alive()) else {
                continue;
            };
            let is_ally = victim.team() == caster_team;
            if is_ally != spell.category.targets_allies() {
                continue;
            }

            let defense = victim.armor().magical_defense.max(rules.resistance_floor);
            let armor_element = victim.armor().element;
            let base = spell.magical_attack * 100 / (100 + defense);
            let multiplier = elemental_multiplier(spell.element, armor_element);
            self.log_multiplier(id, multiplier);
            let damage = (base as f32 * multiplier) as i32;

            self.apply_riders(
                caster,
                id,
                spell.element,
                spell.magical_attack / rules.burn_divisor,
                damage,
            )?;
            self.deal_damage(id, damage, spell.element)?;
            affected.push(id);
        }
        Ok(affected)
    }

    /// Consume one of the item at `item_index` on `target`
    pub fn use_item(&mut self, user: CombatantId, target: CombatantId, item_index: usize) -> Result<()> {
        let actor = self.require_actor(user)?;
        let recipient = self.require_target(target)?;
        let item = actor
            .inventory()
            .get(item_index)
            .ok_or(ActionError::InvalidItem(item_index))?;

        if item.quantity == 0 {
            return Err(ActionError::OutOfStock(item.name.clone()));
        }
        if !actor.check_range(recipient, item.range) {
            return Err(ActionError::OutOfRange {
                range: item.range,
                distance: actor.distance_to(recipient).unwrap_or_default(),
            });
        }

        let description = format!("{} uses {} on {}!", actor.name(), item.name, recipient.name());
        let item = self
            .roster
            .require_mut(user)?
            .consume_item(item_index)
            .ok_or(ActionError::InvalidItem(item_index))?;
        self.log(
            BattleEventType::ItemUsed {
                user,
                target,
                item: item.name.clone(),
            },
            description,
        );

        let name = self.name_of(target);
        match item.category {
            ActionCategory::Healing => self.restore_health(target, item.potency)?,
            ActionCategory::RestoreMp => {
                let restored = self.roster.require_mut(target)?.restore_mp(item.potency);
                let (mp, max) = self.roster.get(target).map_or((0, 0), |c| (c.mp(), c.max_mp()));
                self.log(
                    BattleEventType::ManaRestored { id: target, amount: restored },
                    format!("{} restores {} MP! (MP: {}/{})", name, restored, mp, max),
                );
            }
            ActionCategory::Buff => {
                self.log(BattleEventType::Buffed { id: target }, format!("{} is Buffed!", name));
            }
            ActionCategory::Debuff => {
                self.log(BattleEventType::Debuffed { id: target }, format!("{} is Debuffed!", name));
            }
            ActionCategory::Attack => {}
        }
        Ok(())
    }

    /// Apply damage of an element to `target`, with its side effects:
    /// Psi drains morale, Electricity drains mana and Poison armor reflects
    /// half the damage onto adjacent enemies. A target brought to zero
    /// health leaves the grid.
    pub fn deal_damage(&mut self, target: CombatantId, amount: i32, element: Element) -> Result<()> {
        let rules = self.config.rules.clone();
        let victim = self.roster.require_mut(target)?;
        let was_standing = victim.hp() > 0;
        victim.lose_health(amount);

        let description = format!(
            "{} takes {} damage! (HP: {}/{})",
            victim.name(),
            amount,
            victim.hp(),
            victim.max_hp()
        );
        let remaining = victim.hp();
        self.log(
            BattleEventType::Damaged {
                id: target,
                amount,
                element,
                remaining,
            },
            description,
        );

        match element {
            Element::Psi => self.shake_morale(target, amount)?,
            Element::Electricity => {
                let victim = self.roster.require_mut(target)?;
                let drained = victim.drain_mp(amount / rules.shock_drain_divisor);
                let description = format!("{} loses {} MP! (MP: {})", victim.name(), drained, victim.mp());
                self.log(BattleEventType::ManaDrained { id: target, amount: drained }, description);
            }
            _ => {}
        }

        self.reflect_poison(target, amount / rules.reflect_divisor)?;

        let victim = self.roster.require(target)?;
        if was_standing && victim.hp() == 0 {
            let description = format!("{} has been defeated!", victim.name());
            self.grid.remove_combatant(&mut self.roster, target);
            self.log(BattleEventType::Defeated { id: target }, description);
        }
        Ok(())
    }

    fn reflect_poison(&mut self, source: CombatantId, amount: i32) -> Result<()> {
        let victim = self.roster.require(source)?;
        let Some(pos) = victim.position() else {
            return Ok(());
        };
        if victim.armor().element != Element::Poison || amount <= 0 {
            return Ok(());
        }
        let team = victim.team();
        let description = format!("Poison Armor spews toxins! Reflecting {} damage!", amount);
        self.log(BattleEventType::Reflected { source, amount }, description);

        for neighbor in pos.neighbors() {
            let Some(id) = self.grid.combatant_at(neighbor) else {
                continue;
            };
            let hostile = self
                .roster
                .get(id)
                .map_or(false, |c| c.is_alive() && c.team() != team);
            if hostile {
                self.deal_damage(id, amount, Element::Reflect)?;
            }
        }
        Ok(())
    }

    /// Status, stagger or leech effects of an elemental hit
    fn apply_riders(
        &mut self,
        source: CombatantId,
        victim: CombatantId,
        element: Element,
        burn_potency: i32,
        damage: i32,
    ) -> Result<()> {
        let rules = self.config.rules.clone();
        match element {
            Element::Fire => self.inflict(victim, StatusKind::Burn, rules.burn_ticks, burn_potency),
            Element::Acid => self.inflict(
                victim,
                StatusKind::Acid,
                rules.acid_ticks,
                damage / rules.acid_divisor,
            ),
            Element::Ice => {
                let ticks = (damage as f32 * rules.ice_stagger_factor).ceil() as Tick;
                if ticks == 0 {
                    return Ok(());
                }
                let description = format!("Ice chills {}! (+{} Init Ticks)", self.name_of(victim), ticks);
                self.log(BattleEventType::Chilled { id: victim, ticks }, description);
                self.advance(victim, ticks).map(|_| ())
            }
            Element::Bio => {
                if self.roster.get(source).map_or(false, |c| c.hp() > 0) {
                    self.restore_health(source, damage / rules.leech_divisor)?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn inflict(&mut self, id: CombatantId, kind: StatusKind, ticks: Tick, potency: i32) -> Result<()> {
        if self.roster.require_mut(id)?.apply_status(kind, ticks, potency) {
            let description = format!("{} is affected by {}! ({} ticks)", self.name_of(id), kind, ticks);
            self.log(BattleEventType::StatusApplied { id, kind, ticks, potency }, description);
        }
        Ok(())
    }

    fn restore_health(&mut self, id: CombatantId, amount: i32) -> Result<()> {
        let healer = self.roster.require_mut(id)?;
        let restored = healer.heal(amount);
        let description = format!(
            "{} recovers {} HP! (HP: {}/{})",
            healer.name(),
            restored,
            healer.hp(),
            healer.max_hp()
        );
        self.log(BattleEventType::Healed { id, amount: restored }, description);
        Ok(())
    }

    fn shake_morale(&mut self, id: CombatantId, amount: i32) -> Result<()> {
        let victim = self.roster.require_mut(id)?;
        let result = victim.reduce_morale(amount);
        let morale = victim.morale();
        let name = victim.name().to_string();
        self.log(
            BattleEventType::MoraleLost { id, amount },
            format!("Psi attack strikes the mind of {}!", name),
        );
        if result == BreakResult::Breaking {
            self.log(
                BattleEventType::MoraleBroken { id, morale },
                format!("{} is MENTALLY BROKEN! (Morale: {})", name, morale),
            );
        }
        Ok(())
    }

    fn log_multiplier(&mut self, target: CombatantId, multiplier: f32) {
        let label = if multiplier > 1.0 {
            "Weakness Hit!"
        } else if multiplier < 1.0 {
            "Resisted"
        } else {
            return;
        };
        self.log(
            BattleEventType::ElementalHit { target, multiplier },
            format!("({}) on {}", label, self.name_of(target)),
        );
    }
}
