//! Battle integration tests
//!
//! Full battles through the public `Battle` API: scheduling, targeting
//! rules, movement and the sample skirmish.

use grid_tactics::battle::{
    auto_battle, play_turn, skirmish, Action, Battle, BattleEventType, BattleOutcome,
};
use grid_tactics::battle::scenario::{dwayne, goblin_archer};
use grid_tactics::combat::{ActionCategory, Combatant, Element, Spell, Weapon};
use grid_tactics::core::config::BattleConfig;
use grid_tactics::core::error::ActionError;
use grid_tactics::core::types::{CombatantId, Position, Team};
use rand::rngs::mock::StepRng;

fn fighter(name: &str, team: Team, initiative: u32) -> Combatant {
    Combatant::new(name, team, 100, 30, initiative, 50)
}

fn kill<R: rand::Rng>(battle: &mut Battle<R>, id: CombatantId) {
    battle.deal_damage(id, 10_000, Element::Physical).unwrap();
}

// ============================================================================
// Scheduling
// ============================================================================

#[test]
fn test_initiative_tie_is_fair() {
    let mut battle = Battle::with_seed(4, 4, BattleConfig::default(), 2024);
    let a = battle.add_combatant(fighter("A", Team::GoodGuys, 3));
    let b = battle.add_combatant(fighter("B", Team::BadGuys, 3));
    battle.add_combatant(fighter("Late", Team::BadGuys, 4));

    let trials = 4000;
    let mut a_first = 0;
    for _ in 0..trials {
        let next = battle.next_actor().unwrap();
        assert!(next == a || next == b);
        if next == a {
            a_first += 1;
        }
    }
    assert!(
        (1800..=2200).contains(&a_first),
        "A chosen {} times out of {}",
        a_first,
        trials
    );
}

#[test]
fn test_dead_and_fled_never_scheduled() {
    let mut battle = Battle::with_seed(6, 6, BattleConfig::default(), 5);
    let fast = battle.add_combatant(fighter("Fast", Team::GoodGuys, 0));
    let runner = battle.add_combatant(fighter("Runner", Team::GoodGuys, 1));
    let slow = battle.add_combatant(fighter("Slow", Team::BadGuys, 9));
    battle.place(runner, Position::new(0, 3));
    battle.place(slow, Position::new(5, 5));

    kill(&mut battle, fast);
    assert_eq!(battle.next_actor(), Some(runner));

    battle.move_combatant(runner, -1, 0).unwrap();
    assert!(battle.combatant(runner).unwrap().has_fled());
    assert_eq!(battle.next_actor(), Some(slow));
}

#[test]
fn test_winner_states() {
    let mut battle = Battle::with_seed(6, 6, BattleConfig::default(), 5);
    let good = battle.add_combatant(fighter("Good", Team::GoodGuys, 0));
    let bad = battle.add_combatant(fighter("Bad", Team::BadGuys, 0));
    assert_eq!(battle.outcome(), BattleOutcome::Undecided);

    kill(&mut battle, good);
    assert_eq!(battle.outcome(), BattleOutcome::Victory(Team::BadGuys));

    kill(&mut battle, bad);
    assert_eq!(battle.outcome(), BattleOutcome::Draw);
    assert_eq!(battle.next_actor(), None);
}

// ============================================================================
// Targeting & actions
// ============================================================================

#[test]
fn test_dead_target_rejected_without_side_effects() {
    let mut battle = Battle::with_seed(6, 6, BattleConfig::default(), 1);
    let hero = battle.add_combatant(dwayne());
    let goblin = battle.add_combatant(goblin_archer("Goblin"));
    battle.place(hero, Position::new(1, 1));
    battle.place(goblin, Position::new(2, 1));
    kill(&mut battle, goblin);

    let events = battle.events().len();
    assert_eq!(
        battle.perform(hero, Action::Attack { target: goblin }),
        Err(ActionError::InvalidTarget(goblin))
    );
    assert_eq!(
        battle.perform(hero, Action::UseItem { target: goblin, item: 0 }),
        Err(ActionError::InvalidTarget(goblin))
    );
    assert_eq!(battle.events().len(), events);
    assert_eq!(battle.combatant(hero).unwrap().initiative(), 5);
    assert_eq!(battle.combatant(hero).unwrap().inventory()[0].quantity, 1);
}

#[test]
fn test_dead_are_removed_from_grid() {
    let mut battle = Battle::with_seed(6, 6, BattleConfig::default(), 1);
    let goblin = battle.add_combatant(goblin_archer("Goblin"));
    battle.place(goblin, Position::new(2, 1));
    kill(&mut battle, goblin);
    assert_eq!(battle.grid().combatant_at(Position::new(2, 1)), None);
    assert_eq!(battle.grid().occupants().count(), 0);
}

#[test]
fn test_perfect_accuracy_always_hits() {
    let mut battle = Battle::with_seed(6, 6, BattleConfig::default(), 77);
    let mut hero = fighter("Hero", Team::GoodGuys, 0);
    hero.equip_weapon(Weapon::new("True Blade", 1, 1.0, 1.5, 1, Element::Physical));
    let dummy = Combatant::new("Dummy", Team::BadGuys, 100_000, 0, 50, 50);
    let hero = battle.add_combatant(hero);
    let dummy = battle.add_combatant(dummy);
    battle.place(hero, Position::new(1, 1));
    battle.place(dummy, Position::new(1, 2));

    for _ in 0..500 {
        let report = battle.attack(hero, dummy).unwrap();
        assert_eq!(report.hits, 1);
    }
    assert_eq!(
        battle.events().count_where(|e| matches!(e, BattleEventType::Missed { .. })),
        0
    );
}

#[test]
fn test_spell_team_filters() {
    let mut battle = Battle::with_rng(10, 10, BattleConfig::default(), StepRng::new(0, 0));
    let mut mage = fighter("Mage", Team::GoodGuys, 0);
    mage.learn_spell(Spell::new("Storm", 30, 5, 9.0, 0, Element::Wind, 1, ActionCategory::Debuff));
    mage.learn_spell(Spell::new("Aegis", 30, 5, 9.0, 0, Element::Magical, 1, ActionCategory::Buff));
    let mage = battle.add_combatant(mage);
    let ally = battle.add_combatant(fighter("Ally", Team::GoodGuys, 0));
    let foe = battle.add_combatant(fighter("Foe", Team::BadGuys, 0));
    battle.place(mage, Position::new(0, 0));
    battle.place(ally, Position::new(5, 5));
    battle.place(foe, Position::new(5, 6));

    assert_eq!(battle.cast_spell(mage, foe, 0), Ok(vec![foe]));
    assert_eq!(battle.combatant(ally).unwrap().hp(), 100);

    assert_eq!(battle.cast_spell(mage, foe, 1), Ok(vec![ally]));
    assert_eq!(battle.combatant(foe).unwrap().hp(), 70);
    assert_eq!(battle.combatant(mage).unwrap().mp(), 20);
}

// ============================================================================
// Movement
// ============================================================================

#[test]
fn test_blocked_move_mutates_nothing() {
    let mut battle = Battle::with_seed(6, 6, BattleConfig::default(), 1);
    let a = battle.add_combatant(fighter("A", Team::GoodGuys, 0));
    let b = battle.add_combatant(fighter("B", Team::GoodGuys, 0));
    battle.place(a, Position::new(2, 2));
    battle.place(b, Position::new(3, 2));

    let moved = battle.move_combatant(a, 1, 0).unwrap();
    assert_eq!(moved.ticks(), 0);
    assert_eq!(battle.combatant(a).unwrap().position(), Some(Position::new(2, 2)));
    assert_eq!(battle.combatant(a).unwrap().initiative(), 0);
    assert_eq!(battle.grid().combatant_at(Position::new(3, 2)), Some(b));
}

#[test]
fn test_off_grid_move_always_flees() {
    let mut battle = Battle::with_seed(3, 3, BattleConfig::default(), 1);
    let runner = battle.add_combatant(fighter("Runner", Team::GoodGuys, 0));
    let guard = battle.add_combatant(fighter("Guard", Team::BadGuys, 0));
    battle.place(runner, Position::new(2, 1));
    battle.place(guard, Position::new(1, 1));

    // Engaged while leaving: charged the full disengage cost
    assert_eq!(battle.perform(runner, Action::Move { dx: 1, dy: 0 }), Ok(7));
    let runner_state = battle.combatant(runner).unwrap();
    assert!(runner_state.has_fled());
    assert_eq!(runner_state.position(), None);
    assert_eq!(battle.grid().combatant_at(Position::new(2, 1)), None);
    assert_eq!(battle.outcome(), BattleOutcome::Victory(Team::BadGuys));

    assert_eq!(battle.perform(runner, Action::Wait), Err(ActionError::ActorDown(runner)));
}

// ============================================================================
// Sample skirmish
// ============================================================================

#[test]
fn test_skirmish_opening_turn() {
    let mut battle = skirmish(BattleConfig::default(), 11);
    battle.start();
    let actor = play_turn(&mut battle).unwrap();
    assert_eq!(battle.combatant(actor).unwrap().name(), "Dwayne");
    // Dwayne steps toward Goblin Archer A
    assert_eq!(
        battle.combatant(actor).unwrap().position(),
        Some(Position::new(1, 0))
    );
    assert_eq!(battle.combatant(actor).unwrap().initiative(), 6);
}

#[test]
fn test_skirmish_runs_to_completion() {
    for seed in [1, 2, 3] {
        let mut battle = skirmish(BattleConfig::default(), seed);
        let outcome = auto_battle(&mut battle, 2000);
        assert!(outcome.is_decided(), "seed {} undecided", seed);

        let ended = battle
            .events()
            .count_where(|e| matches!(e, BattleEventType::BattleEnded { .. }));
        assert_eq!(ended, 1);

        for c in battle.roster().iter() {
            assert!(c.hp() >= 0 && c.hp() <= c.max_hp());
            assert!(c.mp() >= 0 && c.mp() <= c.max_mp());
            if !c.is_alive() {
                assert_eq!(c.position(), None, "{} still on the grid", c.name());
            }
        }
    }
}

#[test]
fn test_default_config_file_matches_defaults() {
    let shipped = BattleConfig::from_toml_str(include_str!("../data/battle.toml")).unwrap();
    assert_eq!(shipped, BattleConfig::default());
}
