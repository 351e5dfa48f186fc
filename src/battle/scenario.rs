//! Sample skirmish: Dwayne & Elizabeth vs two Goblin Archers on a 12x12 grid

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::battle::state::Battle;
use crate::combat::abilities::{Item, Spell};
use crate::combat::armor::Armor;
use crate::combat::combatant::Combatant;
use crate::combat::weapons::Weapon;
use crate::core::config::BattleConfig;
use crate::core::types::{Position, Team};

pub const SKIRMISH_WIDTH: usize = 12;
pub const SKIRMISH_HEIGHT: usize = 12;

pub fn dwayne() -> Combatant {
    let mut c = Combatant::new("Dwayne", Team::GoodGuys, 200, 0, 5, 100);
    c.equip_weapon(Weapon::iron_sword());
    c.equip_armor(Armor::iron());
    c.add_item(Item::health_potion());
    c
}

pub fn elizabeth() -> Combatant {
    let mut c = Combatant::new("Elizabeth", Team::GoodGuys, 100, 75, 7, 70);
    c.equip_weapon(Weapon::wooden_staff());
    c.equip_armor(Armor::cloth());
    c.add_item(Item::magic_potion());
    c.learn_spell(Spell::fireball());
    c
}

pub fn goblin_archer(name: &str) -> Combatant {
    let mut c = Combatant::new(name, Team::BadGuys, 90, 0, 9, 40);
    c.equip_weapon(Weapon::wood_bow());
    c.equip_armor(Armor::wooden());
    c
}

/// Seeded skirmish, ready to play
pub fn skirmish(config: BattleConfig, seed: u64) -> Battle<ChaCha8Rng> {
    let battle = Battle::with_seed(SKIRMISH_WIDTH, SKIRMISH_HEIGHT, config, seed);
    populate(battle)
}

/// Skirmish driven by any random source
pub fn skirmish_with_rng<R: Rng>(config: BattleConfig, rng: R) -> Battle<R> {
    let battle = Battle::with_rng(SKIRMISH_WIDTH, SKIRMISH_HEIGHT, config, rng);
    populate(battle)
}

fn populate<R: Rng>(mut battle: Battle<R>) -> Battle<R> {
    let lineup = [
        (dwayne(), Position::new(0, 0)),
        (elizabeth(), Position::new(2, 0)),
        (goblin_archer("Goblin Archer A"), Position::new(10, 0)),
        (goblin_archer("Goblin Archer B"), Position::new(0, 10)),
    ];
    for (combatant, pos) in lineup {
        let id = battle.add_combatant(combatant);
        if !battle.place(id, pos) {
            tracing::warn!(%id, %pos, "Could not place skirmish combatant");
        }
    }
    battle
}
