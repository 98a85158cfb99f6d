//! State management errors.
//!
//! Errors raised while assembling a battle or manipulating a unit's inventory.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Location, UnitId, WeaponKind};

/// Errors raised while assembling a [`BattleState`](super::BattleState).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateError {
    /// Two units share the same identifier.
    #[error("unit id {unit} is used more than once")]
    DuplicateUnit { unit: UnitId },

    /// A living unit was placed on top of another living unit.
    #[error("unit {unit} cannot be placed at {location}: tile already occupied")]
    PositionOccupied { unit: UnitId, location: Location },

    /// A unit was placed outside the battlefield.
    #[error("unit {unit} is placed at {location}, outside the {width}x{height} battlefield")]
    PositionOutOfBounds {
        unit: UnitId,
        location: Location,
        width: u32,
        height: u32,
    },

    /// A unit's side tag does not match the side that lists it.
    #[error("unit {unit} is listed under side {listed} but tagged side {tagged}")]
    SideMismatch { unit: UnitId, listed: u8, tagged: u8 },

    /// Sides must be listed in id order starting from zero.
    #[error("side at index {index} carries id {id}")]
    SideOutOfOrder { index: usize, id: u8 },

    /// A battle needs at least two sides.
    #[error("a battle needs at least two sides, got {count}")]
    TooFewSides { count: usize },
}

impl GameError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        use StateError::*;
        match self {
            DuplicateUnit { .. } => "STATE_DUPLICATE_UNIT",
            PositionOccupied { .. } => "STATE_POSITION_OCCUPIED",
            PositionOutOfBounds { .. } => "STATE_POSITION_OUT_OF_BOUNDS",
            SideMismatch { .. } => "STATE_SIDE_MISMATCH",
            SideOutOfOrder { .. } => "STATE_SIDE_OUT_OF_ORDER",
            TooFewSides { .. } => "STATE_TOO_FEW_SIDES",
        }
    }
}

/// Rejected weapon or item slot operations. The unit is left untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryError {
    /// Index past the fixed slot capacity.
    #[error("slot {slot} is out of range (capacity {capacity})")]
    SlotOutOfRange { slot: usize, capacity: usize },

    /// Slot exists but holds nothing.
    #[error("slot {slot} is empty")]
    EmptySlot { slot: usize },

    /// Item has no uses left.
    #[error("item '{name}' has no uses left")]
    Exhausted { name: String },

    /// Unit is not trained in this weapon kind.
    #[error("{kind} weapons cannot be wielded by this unit")]
    NotWieldable { kind: WeaponKind },
}

impl InventoryError {
    pub(crate) fn weapon_slot(slot: usize, filled: usize) -> Self {
        if slot >= GameConfig::WEAPON_SLOTS {
            Self::SlotOutOfRange {
                slot,
                capacity: GameConfig::WEAPON_SLOTS,
            }
        } else {
            debug_assert!(slot >= filled);
            Self::EmptySlot { slot }
        }
    }

    pub(crate) fn item_slot(slot: usize, filled: usize) -> Self {
        if slot >= GameConfig::ITEM_SLOTS {
            Self::SlotOutOfRange {
                slot,
                capacity: GameConfig::ITEM_SLOTS,
            }
        } else {
            debug_assert!(slot >= filled);
            Self::EmptySlot { slot }
        }
    }
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        use InventoryError::*;
        match self {
            Exhausted { .. } => ErrorSeverity::Recoverable,
            SlotOutOfRange { .. } | EmptySlot { .. } | NotWieldable { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use InventoryError::*;
        match self {
            SlotOutOfRange { .. } => "INVENTORY_SLOT_OUT_OF_RANGE",
            EmptySlot { .. } => "INVENTORY_EMPTY_SLOT",
            Exhausted { .. } => "INVENTORY_EXHAUSTED",
            NotWieldable { .. } => "INVENTORY_NOT_WIELDABLE",
        }
    }
}
