//! Authoritative battle state representation.
//!
//! This module owns the data structures that describe units, sides, turn
//! bookkeeping and the state-machine phase. Runtime layers clone or query this
//! state but mutate it exclusively through the engine.
mod common;
mod error;
mod item;
mod phase;
mod range;
mod side;
mod unit;
mod weapon;

use std::collections::BTreeSet;

pub use common::{Location, SideId, UnitId};
pub use error::{InventoryError, StateError};
pub use item::{Item, StatKind};
pub use phase::Phase;
pub use range::RangeSet;
pub use side::{Controller, Side};
pub use unit::{ItemUse, LevelUp, Unit, UnitStats, UnitStatus};
pub use weapon::{Weapon, WeaponKind};

use crate::env::Field;

/// Canonical snapshot of a battle in progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// RNG seed for deterministic random generation.
    ///
    /// Combined with `nonce` to derive a unique seed for every roll.
    pub seed: u64,
    /// Number of rolls drawn so far.
    pub nonce: u64,
    /// Full rotations completed, starting at 1.
    pub turn: u32,
    pub current_side: SideId,
    pub phase: Phase,
    pub field: Field,
    pub sides: Vec<Side>,
}

impl BattleState {
    /// Validates the roster and marks every living unit's tile as occupied.
    pub fn new(mut field: Field, sides: Vec<Side>) -> Result<Self, StateError> {
        if sides.len() < 2 {
            return Err(StateError::TooFewSides { count: sides.len() });
        }

        let mut seen = BTreeSet::new();
        for (index, side) in sides.iter().enumerate() {
            if side.id.index() != index {
                return Err(StateError::SideOutOfOrder { index, id: side.id.0 });
            }
            for unit in &side.units {
                if !seen.insert(unit.id) {
                    return Err(StateError::DuplicateUnit { unit: unit.id });
                }
                if unit.side != side.id {
                    return Err(StateError::SideMismatch {
                        unit: unit.id,
                        listed: side.id.0,
                        tagged: unit.side.0,
                    });
                }
                if !unit.is_alive() {
                    continue;
                }
                if !field.in_bounds(unit.location) {
                    return Err(StateError::PositionOutOfBounds {
                        unit: unit.id,
                        location: unit.location,
                        width: field.width(),
                        height: field.height(),
                    });
                }
                if !field.is_empty(unit.location) {
                    return Err(StateError::PositionOccupied {
                        unit: unit.id,
                        location: unit.location,
                    });
                }
                field
                    .fill(unit.location, side.id)
                    .map_err(|_| StateError::PositionOutOfBounds {
                        unit: unit.id,
                        location: unit.location,
                        width: field.width(),
                        height: field.height(),
                    })?;
            }
        }

        Ok(Self {
            seed: 0,
            nonce: 0,
            turn: 1,
            current_side: SideId::FIRST,
            phase: Phase::Idle,
            field,
            sides,
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    pub fn side(&self, id: SideId) -> Option<&Side> {
        self.sides.get(id.index())
    }

    pub fn side_mut(&mut self, id: SideId) -> Option<&mut Side> {
        self.sides.get_mut(id.index())
    }

    pub fn current(&self) -> Option<&Side> {
        self.side(self.current_side)
    }

    /// Every unit of every side in roster order, fallen included.
    pub fn units(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.sides.iter().flat_map(|side| side.units.iter())
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units().find(|unit| unit.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.sides
            .iter_mut()
            .flat_map(|side| side.units.iter_mut())
            .find(|unit| unit.id == id)
    }

    /// Living unit standing on `location`.
    pub fn unit_at(&self, location: Location) -> Option<&Unit> {
        self.units()
            .find(|unit| unit.is_alive() && unit.location == location)
    }

    /// Units of every other side, flattened in side order. Fallen units are kept.
    pub fn enemies_of(&self, side: SideId) -> impl Iterator<Item = &Unit> + '_ {
        self.units().filter(move |unit| unit.side != side)
    }

    /// Sides that still field at least one living unit.
    pub fn surviving_sides(&self) -> impl Iterator<Item = SideId> + '_ {
        self.sides
            .iter()
            .filter(|side| side.has_survivors())
            .map(|side| side.id)
    }

    /// The sole side with survivors, if exactly one remains.
    pub fn victor(&self) -> Option<SideId> {
        let mut surviving = self.surviving_sides();
        match (surviving.next(), surviving.next()) {
            (Some(side), None) => Some(side),
            _ => None,
        }
    }
}
