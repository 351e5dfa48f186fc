//! Battle aggregate
//!
//! `Battle` owns everything a fight needs: the roster, the grid, the
//! initiative manager, the configuration, the random source and the event
//! log. Actions are validated here before any state changes.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::battle::events::{BattleEvent, BattleEventLog, BattleEventType};
use crate::battle::manager::{BattleManager, BattleOutcome};
use crate::battle::roster::Roster;
use crate::combat::combatant::{Combatant, TickReport};
use crate::core::config::BattleConfig;
use crate::core::error::{ActionError, Result};
use crate::core::types::{CombatantId, Position, Tick};
use crate::spatial::grid::{Grid, MovementResult};

/// A complete turn choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Attack { target: CombatantId },
    CastSpell { target: CombatantId, spell: usize },
    UseItem { target: CombatantId, item: usize },
    Guard,
    /// Single step; stepping off the grid flees the battle
    Move { dx: i32, dy: i32 },
    Wait,
}

#[derive(Debug)]
pub struct Battle<R: Rng = ChaCha8Rng> {
    pub(crate) roster: Roster,
    pub(crate) grid: Grid,
    pub(crate) manager: BattleManager,
    pub(crate) config: BattleConfig,
    pub(crate) rng: R,
    pub(crate) events: BattleEventLog,
    pub(crate) turn: u32,
}

impl Battle<ChaCha8Rng> {
    /// Reproducible battle
    pub fn with_seed(width: usize, height: usize, config: BattleConfig, seed: u64) -> Self {
        Self::with_rng(width, height, config, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Battle<R> {
    /// Battle driven by any random source. A config that fails validation
    /// is replaced by the defaults.
    pub fn with_rng(width: usize, height: usize, config: BattleConfig, rng: R) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(reason) => {
                tracing::warn!(%reason, "Invalid battle config, using defaults");
                BattleConfig::default()
            }
        };
        Self {
            roster: Roster::new(),
            grid: Grid::new(width, height),
            manager: BattleManager::new(),
            config,
            rng,
            events: BattleEventLog::new(),
            turn: 0,
        }
    }

    // === Read access ===

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn manager(&self) -> &BattleManager {
        &self.manager
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn combatant(&self, id: CombatantId) -> Option<&Combatant> {
        self.roster.get(id)
    }

    /// Turns begun so far
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn events(&self) -> &BattleEventLog {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<BattleEvent> {
        self.events.drain()
    }

    // === Setup ===

    /// Add a combatant to the roster and the initiative order
    pub fn add_combatant(&mut self, combatant: Combatant) -> CombatantId {
        let id = self.roster.add(combatant);
        self.manager.add_participant(id);
        id
    }

    pub fn place(&mut self, id: CombatantId, pos: Position) -> bool {
        self.grid.place_combatant(&mut self.roster, id, pos)
    }

    pub fn start(&mut self) {
        tracing::info!(
            combatants = self.roster.len(),
            width = self.grid.width(),
            height = self.grid.height(),
            "Battle started"
        );
        self.log(BattleEventType::BattleStarted, "=== BATTLE START ===".into());
    }

    /// Record the final outcome once the battle is decided
    pub fn finish(&mut self) -> BattleOutcome {
        let outcome = self.outcome();
        tracing::info!(%outcome, turns = self.turn, "Battle ended");
        self.log(
            BattleEventType::BattleEnded { outcome },
            format!("Battle ended: {}", outcome),
        );
        outcome
    }

    // === Scheduling ===

    /// Lowest-initiative living combatant. Ties are resolved at random.
    pub fn next_actor(&mut self) -> Option<CombatantId> {
        let tied = self.manager.lowest_initiative(&self.roster);
        let chosen = self.manager.next_active(&self.roster, &mut self.rng)?;
        if tied.len() > 1 {
            let initiative = self.roster.get(chosen).map_or(0, |c| c.initiative());
            tracing::info!(initiative, tied = tied.len(), "Initiative tie resolved at random");
            let description = format!(
                "Tie detected for initiative {}. {} acts.",
                initiative,
                self.name_of(chosen)
            );
            self.log(BattleEventType::InitiativeTie { initiative, tied, chosen }, description);
        }
        Some(chosen)
    }

    pub fn outcome(&self) -> BattleOutcome {
        self.manager.winner(&self.roster)
    }

    /// Start an action cycle for `id`: guard from the previous cycle drops
    pub fn begin_turn(&mut self, id: CombatantId) -> Result<()> {
        let actor = self.require_actor(id)?;
        let description = format!(
            ">>> TURN: {} (HP:{} MP:{})",
            actor.name(),
            actor.hp(),
            actor.mp()
        );
        self.turn += 1;
        self.log(BattleEventType::TurnStarted { actor: id }, description);

        if self.roster.require_mut(id)?.start_turn() {
            let description = format!("{} lowers their guard", self.name_of(id));
            self.log(BattleEventType::GuardDropped { id }, description);
        }
        Ok(())
    }

    /// Let ticks elapse for `id`, recording burns, expiries and deaths
    pub fn advance(&mut self, id: CombatantId, ticks: Tick) -> Result<TickReport> {
        let report = self.roster.require_mut(id)?.add_ticks(ticks);
        let name = self.name_of(id);

        if report.burn_damage > 0 {
            let hp = self.roster.get(id).map_or(0, |c| c.hp());
            self.log(
                BattleEventType::Burned { id, amount: report.burn_damage },
                format!("{} burns for {} damage (HP: {})", name, report.burn_damage, hp),
            );
        }
        for &kind in &report.expired {
            self.log(
                BattleEventType::StatusExpired { id, kind },
                format!("{} is no longer affected by {}", name, kind),
            );
        }
        if report.succumbed {
            self.grid.remove_combatant(&mut self.roster, id);
            self.log(
                BattleEventType::Defeated { id },
                format!("{} succumbed to their wounds", name),
            );
        }
        Ok(report)
    }

    // === Simple actions ===

    pub fn guard(&mut self, id: CombatantId) -> Result<()> {
        self.require_actor(id)?;
        self.roster.require_mut(id)?.guard();
        let description = format!("{} takes a defensive stance", self.name_of(id));
        self.log(BattleEventType::Guarded { id }, description);
        Ok(())
    }

    pub fn wait(&mut self, id: CombatantId) -> Result<()> {
        self.require_actor(id)?;
        let description = format!("{} waits", self.name_of(id));
        self.log(BattleEventType::Waited { id }, description);
        Ok(())
    }

    /// Single-step move. A blocked or unplaced mover is reported with a
    /// zero-tick result and nothing changes.
    pub fn move_combatant(&mut self, id: CombatantId, dx: i32, dy: i32) -> Result<MovementResult> {
        self.require_actor(id)?;
        let result = self
            .grid
            .move_combatant(&mut self.roster, id, dx, dy, &self.config.costs);

        let name = self.name_of(id);
        match result {
            MovementResult::Moved { from, to, ticks, .. } => self.log(
                BattleEventType::Moved { id, from, to, ticks },
                format!("{} moves {} -> {}", name, from, to),
            ),
            MovementResult::Fled { .. } => self.log(
                BattleEventType::Fled { id },
                format!("{} fled the battlefield!", name),
            ),
            MovementResult::Blocked { .. } => self.log(
                BattleEventType::MoveBlocked { id },
                format!("{} cannot move there", name),
            ),
            MovementResult::NotPlaced => {}
        }
        Ok(result)
    }

    /// Validate and resolve `action`, then charge its tick cost.
    /// Returns the ticks charged. Nothing is charged on error.
    pub fn perform(&mut self, actor: CombatantId, action: Action) -> Result<Tick> {
        let costs = self.config.costs.clone();
        let ticks = match action {
            Action::Attack { target } => {
                self.attack(actor, target)?;
                costs.attack
            }
            Action::CastSpell { target, spell } => {
                self.cast_spell(actor, target, spell)?;
                costs.spell
            }
            Action::UseItem { target, item } => {
                self.use_item(actor, target, item)?;
                costs.item
            }
            Action::Guard => {
                self.guard(actor)?;
                costs.guard
            }
            Action::Move { dx, dy } => {
                let moved = self.move_combatant(actor, dx, dy)?;
                if moved.ticks() == 0 {
                    return Err(ActionError::Blocked);
                }
                moved.ticks()
            }
            Action::Wait => {
                self.wait(actor)?;
                costs.move_base
            }
        };
        self.advance(actor, ticks)?;
        Ok(ticks)
    }

    // === Internal helpers ===

    pub(crate) fn log(&mut self, event_type: BattleEventType, description: String) {
        self.events.push(event_type, description, self.turn);
    }

    pub(crate) fn name_of(&self, id: CombatantId) -> String {
        self.roster
            .get(id)
            .map_or_else(|| id.to_string(), |c| c.name().to_string())
    }

    /// Known, alive and not fled
    pub(crate) fn require_actor(&self, id: CombatantId) -> Result<&Combatant> {
        let combatant = self.roster.require(id)?;
        if !combatant.is_alive() {
            return Err(ActionError::ActorDown(id));
        }
        Ok(combatant)
    }

    pub(crate) fn require_target(&self, id: CombatantId) -> Result<&Combatant> {
        let combatant = self.roster.require(id)?;
        if !combatant.is_alive() {
            return Err(ActionError::InvalidTarget(id));
        }
        Ok(combatant)
    }
}
