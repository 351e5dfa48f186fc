//! Turn drivers
//!
//! Greedy AI for combatants in good order, panic flight for broken ones,
//! and a loop that plays a battle to its end. Planning is pure; the turn
//! functions perform the plan and fall back to waiting if it fails.

use rand::Rng;

use crate::battle::events::BattleEventType;
use crate::battle::manager::BattleOutcome;
use crate::battle::state::{Action, Battle};
use crate::core::error::Result;
use crate::core::types::{CombatantId, Position, Tick};

/// Closest living, placed enemy. Ties go to the earliest participant.
pub fn nearest_enemy<R: Rng>(battle: &Battle<R>, actor: CombatantId) -> Option<CombatantId> {
    let me = battle.combatant(actor)?;
    let from = me.position()?;

    let mut nearest = None;
    let mut best = f32::MAX;
    for &id in battle.manager().participants() {
        let Some(other) = battle.combatant(id) else {
            continue;
        };
        if !other.is_alive() || !other.is_enemy_of(me) {
            continue;
        }
        let Some(pos) = other.position() else {
            continue;
        };
        let distance = from.distance(&pos);
        if distance < best {
            best = distance;
            nearest = Some(id);
        }
    }
    nearest
}

/// One step along the dominant axis toward `to`
pub fn step_toward(from: Position, to: Position) -> (i32, i32) {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx.abs() > dy.abs() {
        (dx.signum(), 0)
    } else if dy > 0 {
        (0, 1)
    } else {
        (0, -1)
    }
}

/// Step toward the closest map edge. North wins ties, then south, west, east.
pub fn edge_step(pos: Position, width: usize, height: usize) -> (i32, i32) {
    let (w, h) = (width as i32, height as i32);
    let options = [
        (pos.y, (0, -1)),
        (h - 1 - pos.y, (0, 1)),
        (pos.x, (-1, 0)),
        (w - 1 - pos.x, (1, 0)),
    ];

    let mut best = options[0];
    for option in &options[1..] {
        if option.0 < best.0 {
            best = *option;
        }
    }
    best.1
}

/// Spells first, then the weapon; step closer when out of range
pub fn greedy_action<R: Rng>(battle: &Battle<R>, actor: CombatantId) -> Action {
    let Some(target) = nearest_enemy(battle, actor) else {
        return Action::Wait;
    };
    let (Some(me), Some(foe)) = (battle.combatant(actor), battle.combatant(target)) else {
        return Action::Wait;
    };

    let approach = match (me.position(), foe.position()) {
        (Some(from), Some(to)) => {
            let (dx, dy) = step_toward(from, to);
            Action::Move { dx, dy }
        }
        _ => Action::Wait,
    };

    if let Some(spell) = me.spells().iter().position(|s| me.mp() >= s.mp_cost) {
        if me.check_range(foe, me.spells()[spell].range) {
            return Action::CastSpell { target, spell };
        }
        return approach;
    }

    if me.check_range(foe, me.weapon().range) {
        Action::Attack { target }
    } else {
        approach
    }
}

pub fn greedy_turn<R: Rng>(battle: &mut Battle<R>, actor: CombatantId) -> Result<Tick> {
    let action = greedy_action(battle, actor);
    match battle.perform(actor, action) {
        Ok(ticks) => Ok(ticks),
        Err(err) => {
            tracing::debug!(%actor, ?action, %err, "Action failed, waiting instead");
            battle.perform(actor, Action::Wait)
        }
    }
}

/// Broken combatant runs for the nearest edge. A step that keeps it on
/// the grid restores a little morale.
pub fn panic_turn<R: Rng>(battle: &mut Battle<R>, actor: CombatantId) -> Result<Tick> {
    let (name, pos) = {
        let me = battle.roster.require(actor)?;
        (me.name().to_string(), me.position())
    };
    battle.log(
        BattleEventType::Panicked { id: actor },
        format!("{} is BROKEN and panics!", name),
    );

    let Some(pos) = pos else {
        return battle.perform(actor, Action::Wait);
    };
    let (dx, dy) = edge_step(pos, battle.grid().width(), battle.grid().height());

    match battle.perform(actor, Action::Move { dx, dy }) {
        Ok(ticks) => {
            let me = battle.roster.require_mut(actor)?;
            if !me.has_fled() {
                let amount = battle.config.rules.panic_morale_regain;
                me.regain_morale(amount);
                let description = format!(
                    "{} regains {} Morale. (Current: {})",
                    name,
                    amount,
                    me.morale()
                );
                battle.log(BattleEventType::MoraleRegained { id: actor, amount }, description);
            }
            Ok(ticks)
        }
        Err(_) => battle.perform(actor, Action::Wait),
    }
}

/// Run the next actor's turn. `None` once nobody can act.
pub fn play_turn<R: Rng>(battle: &mut Battle<R>) -> Option<CombatantId> {
    let actor = battle.next_actor()?;
    if let Err(err) = battle.begin_turn(actor) {
        tracing::warn!(%actor, %err, "Could not begin turn");
        return None;
    }

    let broken = battle.combatant(actor).map_or(false, |c| c.is_broken());
    let result = if broken {
        panic_turn(battle, actor)
    } else {
        greedy_turn(battle, actor)
    };
    if let Err(err) = result {
        tracing::warn!(%actor, %err, "Turn ended without acting");
    }
    Some(actor)
}

/// Play turns until one side is left standing or `max_turns` is reached
pub fn auto_battle<R: Rng>(battle: &mut Battle<R>, max_turns: u32) -> BattleOutcome {
    battle.start();
    for _ in 0..max_turns {
        if battle.outcome().is_decided() {
            break;
        }
        if play_turn(battle).is_none() {
            break;
        }
    }
    battle.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::abilities::Spell;
    use crate::combat::combatant::Combatant;
    use crate::combat::element::Element;
    use crate::combat::weapons::Weapon;
    use crate::core::config::BattleConfig;
    use crate::core::types::Team;
    use rand::rngs::mock::StepRng;

    fn arena() -> Battle<StepRng> {
        Battle::with_rng(12, 12, BattleConfig::default(), StepRng::new(0x7FFF_FFFF, 0))
    }

    #[test]
    fn test_step_toward_dominant_axis() {
        let origin = Position::new(5, 5);
        assert_eq!(step_toward(origin, Position::new(9, 6)), (1, 0));
        assert_eq!(step_toward(origin, Position::new(1, 4)), (-1, 0));
        assert_eq!(step_toward(origin, Position::new(6, 9)), (0, 1));
        // Equal offsets move vertically
        assert_eq!(step_toward(origin, Position::new(3, 3)), (0, -1));
    }

    #[test]
    fn test_edge_step_priorities() {
        assert_eq!(edge_step(Position::new(5, 1), 12, 12), (0, -1));
        assert_eq!(edge_step(Position::new(5, 10), 12, 12), (0, 1));
        assert_eq!(edge_step(Position::new(1, 5), 12, 12), (-1, 0));
        assert_eq!(edge_step(Position::new(10, 5), 12, 12), (1, 0));
        // Corner tie: north first
        assert_eq!(edge_step(Position::new(0, 0), 12, 12), (0, -1));
        // South beats west and east on a tie
        assert_eq!(edge_step(Position::new(0, 11), 12, 12), (0, 1));
    }

    #[test]
    fn test_nearest_enemy_skips_allies_dead_and_unplaced() {
        let mut battle = arena();
        let me = battle.add_combatant(Combatant::new("Me", Team::GoodGuys, 10, 0, 0, 10));
        let ally = battle.add_combatant(Combatant::new("Ally", Team::GoodGuys, 10, 0, 0, 10));
        let dead = battle.add_combatant(Combatant::new("Dead", Team::BadGuys, 10, 0, 0, 10));
        let _stray = battle.add_combatant(Combatant::new("Stray", Team::BadGuys, 10, 0, 0, 10));
        let far = battle.add_combatant(Combatant::new("Far", Team::BadGuys, 10, 0, 0, 10));
        battle.place(me, Position::new(0, 0));
        battle.place(ally, Position::new(0, 1));
        battle.place(dead, Position::new(1, 0));
        battle.place(far, Position::new(6, 6));
        battle.roster.require_mut(dead).unwrap().lose_health(10);

        assert_eq!(nearest_enemy(&battle, me), Some(far));
    }

    #[test]
    fn test_greedy_prefers_spell_in_range() {
        let mut battle = arena();
        let mut mage = Combatant::new("Mage", Team::GoodGuys, 50, 30, 0, 10);
        mage.learn_spell(Spell::fireball());
        let mage = battle.add_combatant(mage);
        let goblin = battle.add_combatant(Combatant::new("Goblin", Team::BadGuys, 90, 0, 9, 40));
        battle.place(mage, Position::new(0, 0));
        battle.place(goblin, Position::new(8, 0));

        assert_eq!(
            greedy_action(&battle, mage),
            Action::CastSpell { target: goblin, spell: 0 }
        );

        battle.roster.require_mut(mage).unwrap().drain_mp(30);
        assert_eq!(greedy_action(&battle, mage), Action::Move { dx: 1, dy: 0 });
    }

    #[test]
    fn test_greedy_attacks_in_range() {
        let mut battle = arena();
        let mut knight = Combatant::new("Knight", Team::GoodGuys, 50, 0, 0, 10);
        knight.equip_weapon(Weapon::iron_sword());
        let knight = battle.add_combatant(knight);
        let goblin = battle.add_combatant(Combatant::new("Goblin", Team::BadGuys, 90, 0, 9, 40));
        battle.place(knight, Position::new(3, 3));
        battle.place(goblin, Position::new(4, 4));

        assert_eq!(greedy_action(&battle, knight), Action::Attack { target: goblin });
        assert_eq!(greedy_turn(&mut battle, knight), Ok(6));
    }

    #[test]
    fn test_greedy_blocked_step_waits() {
        let mut battle = arena();
        let knight = battle.add_combatant(Combatant::new("Knight", Team::GoodGuys, 50, 0, 0, 10));
        let ally = battle.add_combatant(Combatant::new("Squire", Team::GoodGuys, 50, 0, 0, 10));
        let goblin = battle.add_combatant(Combatant::new("Goblin", Team::BadGuys, 90, 0, 9, 40));
        battle.place(knight, Position::new(0, 0));
        battle.place(ally, Position::new(1, 0));
        battle.place(goblin, Position::new(6, 0));

        assert_eq!(greedy_turn(&mut battle, knight), Ok(1));
        let knight = battle.combatant(knight).unwrap();
        assert_eq!(knight.position(), Some(Position::new(0, 0)));
        assert_eq!(knight.initiative(), 1);
    }

    #[test]
    fn test_panic_turn_retreats_and_recovers() {
        let mut battle = arena();
        let coward = battle.add_combatant(Combatant::new("Coward", Team::BadGuys, 50, 0, 0, -1));
        battle.place(coward, Position::new(5, 2));

        assert_eq!(panic_turn(&mut battle, coward), Ok(1));
        let c = battle.combatant(coward).unwrap();
        assert_eq!(c.position(), Some(Position::new(5, 1)));
        assert_eq!(c.morale(), 1);
        assert!(!c.is_broken());
    }

    #[test]
    fn test_panic_turn_off_edge_flees() {
        let mut battle = arena();
        let coward = battle.add_combatant(Combatant::new("Coward", Team::BadGuys, 50, 0, 0, -5));
        battle.place(coward, Position::new(5, 0));

        assert_eq!(panic_turn(&mut battle, coward), Ok(1));
        let c = battle.combatant(coward).unwrap();
        assert!(c.has_fled());
        assert_eq!(c.morale(), -5);
        assert_eq!(battle.grid().occupants().count(), 0);
    }

    #[test]
    fn test_auto_battle_ends_with_victory() {
        let mut battle = arena();
        let mut knight = Combatant::new("Knight", Team::GoodGuys, 200, 0, 0, 100);
        knight.equip_weapon(Weapon::new("Great Axe", 100, 1.0, 1.5, 1, Element::Physical));
        let knight = battle.add_combatant(knight);
        let goblin = battle.add_combatant(Combatant::new("Goblin", Team::BadGuys, 90, 0, 9, 40));
        battle.place(knight, Position::new(0, 0));
        battle.place(goblin, Position::new(3, 0));

        let outcome = auto_battle(&mut battle, 100);
        assert_eq!(outcome, BattleOutcome::Victory(Team::GoodGuys));
        assert!(!battle.combatant(goblin).unwrap().is_alive());
        assert!(battle.combatant(knight).unwrap().is_alive());
    }
}
