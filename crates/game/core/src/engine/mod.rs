//! Battle state machine.
//!
//! The [`BattleEngine`] is the only writer of [`BattleState`]. Player input
//! arrives through [`BattleEngine::confirm`] and [`BattleEngine::cancel`];
//! side rotation and AI turns through [`BattleEngine::end_turn`]. Every
//! successful call returns the [`BattleEvent`]s it produced, and a rejected
//! call leaves the state untouched.

mod ai_turn;
mod errors;
mod events;
mod strike;
mod transition;
mod turns;

pub use errors::TransitionError;
pub use events::BattleEvent;
pub use transition::{Command, Input};

use std::collections::BTreeSet;

use crate::combat::{Combatant, Forecast, forecast};
use crate::config::GameConfig;
use crate::env::{RngOracle, compute_seed};
use crate::movement::{MovementRange, movement_range, threat_range};
use crate::state::{BattleState, Location, Phase, SideId, Unit, UnitId};

/// Drives one battle.
///
/// Holds the state mutably for its lifetime, the randomness source used for
/// hit and growth rolls, and the tunables.
pub struct BattleEngine<'a> {
    state: &'a mut BattleState,
    rng: &'a dyn RngOracle,
    config: &'a GameConfig,
}

impl<'a> BattleEngine<'a> {
    pub fn new(state: &'a mut BattleState, rng: &'a dyn RngOracle, config: &'a GameConfig) -> Self {
        Self { state, rng, config }
    }

    pub fn state(&self) -> &BattleState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_side(&self) -> SideId {
        self.state.current_side
    }

    pub fn turn(&self) -> u32 {
        self.state.turn
    }

    pub fn victor(&self) -> Option<SideId> {
        self.state.victor()
    }

    /// Tiles the unit could reach from where it stands.
    pub fn movement_of(&self, unit: UnitId) -> Option<MovementRange> {
        let unit = self.state.unit(unit)?;
        Some(movement_range(
            &self.state.field,
            unit.location,
            unit.side,
            unit.movement_budget(),
        ))
    }

    pub fn threat_of(&self, unit: UnitId) -> Option<BTreeSet<Location>> {
        let unit = self.state.unit(unit)?;
        Some(threat_range(&self.state.field, unit))
    }

    /// Expected hit and damage for both directions of a strike.
    pub fn forecast(&self, attacker: UnitId, defender: UnitId) -> Option<Forecast> {
        let attacker = self.state.unit(attacker)?;
        let defender = self.state.unit(defender)?;
        Some(forecast(
            &Combatant::on(&self.state.field, attacker),
            &Combatant::on(&self.state.field, defender),
        ))
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn unit(&self, id: UnitId) -> Result<&Unit, TransitionError> {
        self.state
            .unit(id)
            .ok_or(TransitionError::UnknownUnit { unit: id })
    }

    fn unit_mut(&mut self, id: UnitId) -> Result<&mut Unit, TransitionError> {
        self.state
            .unit_mut(id)
            .ok_or(TransitionError::UnknownUnit { unit: id })
    }

    /// Draws a percentage roll and advances the nonce.
    fn roll(&mut self, unit: UnitId, context: u32) -> u32 {
        let seed = compute_seed(self.state.seed, self.state.nonce, unit.0, context);
        self.state.nonce += 1;
        self.rng.roll_percent(seed)
    }

    fn ensure_running(&self) -> Result<(), TransitionError> {
        match self.state.phase {
            Phase::Concluded { victor } => Err(TransitionError::Concluded { victor }),
            _ => Ok(()),
        }
    }

    fn ensure_idle(&self, input: &'static str) -> Result<(), TransitionError> {
        self.ensure_running()?;
        if self.state.phase.is_idle() {
            Ok(())
        } else {
            Err(TransitionError::WrongPhase {
                phase: self.state.phase.name(),
                input,
            })
        }
    }
}

