//! Player-facing confirm/cancel transitions.
//!
//! | Phase            | Input              | Next             |
//! |------------------|--------------------|------------------|
//! | Idle             | `Tile`             | UnitSelected     |
//! | UnitSelected     | `Tile`             | UnitMoved        |
//! | UnitMoved        | `Command(Attack)`  | WeaponMenu       |
//! | UnitMoved        | `Command(Item)`    | ItemMenu         |
//! | UnitMoved        | `Command(Wait)`    | Idle             |
//! | WeaponMenu       | `Weapon(slot)`     | Targeting        |
//! | Targeting        | `Tile`             | ConfirmingStrike |
//! | ConfirmingStrike | `Proceed`          | StrikeInProgress |
//! | StrikeInProgress | `Proceed`          | Idle             |
//! | ItemMenu         | `Weapon(slot)`     | ItemMenu         |
//! | ItemMenu         | `Item(slot)`       | Idle             |

use super::{BattleEngine, BattleEvent, TransitionError};
use crate::combat::{Combatant, forecast};
use crate::state::{Location, Phase, UnitId};

/// Action menu entries offered once a unit has moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Command {
    Wait,
    Attack,
    Item,
}

/// A single confirm input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Input {
    /// A battlefield tile: select a unit, a destination or a target.
    Tile(Location),
    Command(Command),
    /// A weapon slot.
    Weapon(usize),
    /// An item slot.
    Item(usize),
    /// Advance a pending strike.
    Proceed,
}

impl Input {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

impl<'a> BattleEngine<'a> {
    /// Applies one confirm input to the current phase.
    pub fn confirm(&mut self, input: Input) -> Result<Vec<BattleEvent>, TransitionError> {
        self.ensure_running()?;
        let phase = self.state.phase;
        tracing::debug!(phase = phase.name(), input = ?input, "confirm");

        match (phase, input) {
            (Phase::Idle, Input::Tile(location)) => self.select_unit(location),
            (Phase::UnitSelected { unit }, Input::Tile(location)) => self.move_unit(unit, location),
            (Phase::UnitMoved { unit }, Input::Command(Command::Attack)) => {
                if self.unit(unit)?.primary_weapon().is_none() {
                    return Err(TransitionError::NoWeapon { unit });
                }
                self.state.phase = Phase::WeaponMenu { unit };
                Ok(Vec::new())
            }
            (Phase::UnitMoved { unit }, Input::Command(Command::Item)) => {
                self.state.phase = Phase::ItemMenu { unit };
                Ok(Vec::new())
            }
            (Phase::UnitMoved { unit }, Input::Command(Command::Wait)) => {
                self.finish_unit(unit, vec![BattleEvent::UnitWaited { unit }], true)
            }
            (Phase::WeaponMenu { unit }, Input::Weapon(slot)) => {
                let event = self.equip(unit, slot)?;
                self.state.phase = Phase::Targeting {
                    unit,
                    swapped_from: slot,
                };
                Ok(vec![event])
            }
            (Phase::Targeting { unit, swapped_from }, Input::Tile(location)) => {
                self.choose_target(unit, swapped_from, location)
            }
            (Phase::ConfirmingStrike { unit, target, .. }, Input::Proceed) => {
                let events = self.strike(unit, target, false)?;
                self.state.phase = Phase::StrikeInProgress { unit, target };
                Ok(events)
            }
            (Phase::StrikeInProgress { unit, target }, Input::Proceed) => {
                let events = self.counter_if_able(unit, target)?;
                self.finish_unit(unit, events, true)
            }
            (Phase::ItemMenu { unit }, Input::Weapon(slot)) => Ok(vec![self.equip(unit, slot)?]),
            (Phase::ItemMenu { unit }, Input::Item(slot)) => {
                let usage = self.unit_mut(unit)?.use_item(slot)?;
                tracing::debug!(unit = %unit, item = %usage.name, stat = %usage.stat, "item used");
                self.finish_unit(unit, vec![BattleEvent::ItemUsed { unit, usage }], true)
            }
            (phase, input) => Err(TransitionError::WrongPhase {
                phase: phase.name(),
                input: input.name(),
            }),
        }
    }

    /// Steps back one phase, reversing whatever entering it changed.
    pub fn cancel(&mut self) -> Result<Vec<BattleEvent>, TransitionError> {
        self.ensure_running()?;
        let phase = self.state.phase;
        tracing::debug!(phase = phase.name(), "cancel");

        let (next, events) = match phase {
            Phase::UnitSelected { unit } => (Phase::Idle, vec![BattleEvent::SelectionCleared { unit }]),
            Phase::UnitMoved { unit } => {
                let event = self.undo_move(unit)?;
                (Phase::UnitSelected { unit }, vec![event])
            }
            Phase::WeaponMenu { unit } | Phase::ItemMenu { unit } => {
                (Phase::UnitMoved { unit }, Vec::new())
            }
            Phase::Targeting { unit, swapped_from } => {
                self.unit_mut(unit)?.unequip_to(swapped_from);
                (
                    Phase::WeaponMenu { unit },
                    vec![BattleEvent::WeaponOrderRestored {
                        unit,
                        slot: swapped_from,
                    }],
                )
            }
            Phase::ConfirmingStrike {
                unit, swapped_from, ..
            } => (Phase::Targeting { unit, swapped_from }, Vec::new()),
            Phase::Idle | Phase::StrikeInProgress { .. } | Phase::Concluded { .. } => {
                return Err(TransitionError::NothingToCancel { phase: phase.name() });
            }
        };
        self.state.phase = next;
        Ok(events)
    }

    fn select_unit(&mut self, location: Location) -> Result<Vec<BattleEvent>, TransitionError> {
        let unit = self
            .state
            .unit_at(location)
            .ok_or(TransitionError::NoUnitAt { location })?;
        let id = unit.id;
        if unit.side != self.state.current_side {
            return Err(TransitionError::NotSelectable {
                unit: id,
                reason: "belongs to another side",
            });
        }
        if !unit.enabled {
            return Err(TransitionError::NotSelectable {
                unit: id,
                reason: "already acted this turn",
            });
        }

        let destinations = self
            .movement_of(id)
            .map(|range| range.destinations(&self.state.field))
            .unwrap_or_default();
        self.state.phase = Phase::UnitSelected { unit: id };
        Ok(vec![BattleEvent::UnitSelected {
            unit: id,
            destinations,
        }])
    }

    fn move_unit(&mut self, unit: UnitId, to: Location) -> Result<Vec<BattleEvent>, TransitionError> {
        let legal = self
            .movement_of(unit)
            .is_some_and(|range| range.can_stop_at(&self.state.field, to));
        if !legal {
            return Err(TransitionError::UnreachableTile { location: to });
        }

        let event = self.relocate(unit, to)?;
        self.state.phase = Phase::UnitMoved { unit };
        Ok(vec![event])
    }

    /// Moves a unit and keeps occupancy in step. Destination must be legal.
    pub(super) fn relocate(&mut self, unit: UnitId, to: Location) -> Result<BattleEvent, TransitionError> {
        let (side, from) = {
            let mover = self.unit(unit)?;
            (mover.side, mover.location)
        };
        self.state.field.empty(from)?;
        self.state.field.fill(to, side)?;
        self.unit_mut(unit)?.commit_move(to);
        tracing::debug!(unit = %unit, %from, %to, "moved");
        Ok(BattleEvent::UnitMoved { unit, from, to })
    }

    fn undo_move(&mut self, unit: UnitId) -> Result<BattleEvent, TransitionError> {
        let (side, from, to) = {
            let mover = self.unit(unit)?;
            (mover.side, mover.location, mover.previous_location)
        };
        self.state.field.empty(from)?;
        self.state.field.fill(to, side)?;
        self.unit_mut(unit)?.undo_move();
        Ok(BattleEvent::MoveUndone { unit, from, to })
    }

    pub(super) fn equip(&mut self, unit: UnitId, slot: usize) -> Result<BattleEvent, TransitionError> {
        let wielder = self.unit_mut(unit)?;
        wielder.equip(slot)?;
        let weapon = wielder
            .primary_weapon()
            .map(|weapon| weapon.name.clone())
            .unwrap_or_default();
        Ok(BattleEvent::WeaponEquipped { unit, weapon, slot })
    }

    fn choose_target(
        &mut self,
        unit: UnitId,
        swapped_from: usize,
        location: Location,
    ) -> Result<Vec<BattleEvent>, TransitionError> {
        let attacker = self.unit(unit)?;
        let target = self
            .state
            .unit_at(location)
            .filter(|target| target.side != attacker.side)
            .filter(|target| {
                attacker
                    .primary_weapon()
                    .is_some_and(|weapon| weapon.reaches(attacker.location.distance(target.location)))
            })
            .ok_or(TransitionError::InvalidTarget { location })?;

        let field = &self.state.field;
        let forecast = forecast(&Combatant::on(field, attacker), &Combatant::on(field, target));
        let target = target.id;

        self.state.phase = Phase::ConfirmingStrike {
            unit,
            swapped_from,
            target,
        };
        Ok(vec![BattleEvent::TargetChosen {
            unit,
            target,
            forecast,
        }])
    }

    /// Disables a unit that has finished acting and returns to `Idle`.
    ///
    /// Concludes the battle when a victor emerges, otherwise ends the turn
    /// when `auto_end` is set and the side has nobody left to act.
    pub(super) fn finish_unit(
        &mut self,
        unit: UnitId,
        mut events: Vec<BattleEvent>,
        auto_end: bool,
    ) -> Result<Vec<BattleEvent>, TransitionError> {
        self.unit_mut(unit)?.enabled = false;
        self.state.phase = Phase::Idle;

        if let Some(event) = self.check_victory() {
            events.push(event);
            return Ok(events);
        }
        if auto_end && self.config.auto_end_turn && self.side_exhausted() {
            events.extend(self.end_turn()?);
        }
        Ok(events)
    }
}
