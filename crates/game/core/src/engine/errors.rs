//! Error types for the battle state machine.

use crate::env::FieldError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{InventoryError, Location, SideId, UnitId};

/// Rejected state-machine requests. A rejected request never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The input is not accepted in the current phase.
    #[error("{input} is not accepted while {phase}")]
    WrongPhase {
        phase: &'static str,
        input: &'static str,
    },

    #[error("nothing to cancel while {phase}")]
    NothingToCancel { phase: &'static str },

    #[error("the battle is over: {victor} won")]
    Concluded { victor: SideId },

    #[error("no unit stands at {location}")]
    NoUnitAt { location: Location },

    #[error("unit {unit} cannot act: {reason}")]
    NotSelectable { unit: UnitId, reason: &'static str },

    #[error("{location} is not a legal destination")]
    UnreachableTile { location: Location },

    #[error("unit {unit} carries no weapon")]
    NoWeapon { unit: UnitId },

    #[error("no enemy at {location} is within range")]
    InvalidTarget { location: Location },

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    /// Phase or roster refers to a unit that does not exist.
    #[error("unit {unit} is not part of this battle")]
    UnknownUnit { unit: UnitId },

    #[error("occupancy update failed: {0}")]
    Occupancy(#[from] FieldError),
}

impl GameError for TransitionError {
    fn severity(&self) -> ErrorSeverity {
        use TransitionError::*;
        match self {
            UnreachableTile { .. } | InvalidTarget { .. } | NoUnitAt { .. } => {
                ErrorSeverity::Recoverable
            }
            WrongPhase { .. } | NothingToCancel { .. } | NotSelectable { .. } | NoWeapon { .. } => {
                ErrorSeverity::Validation
            }
            Inventory(inner) => inner.severity(),
            Concluded { .. } => ErrorSeverity::Fatal,
            UnknownUnit { .. } | Occupancy(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use TransitionError::*;
        match self {
            WrongPhase { .. } => "TRANSITION_WRONG_PHASE",
            NothingToCancel { .. } => "TRANSITION_NOTHING_TO_CANCEL",
            Concluded { .. } => "TRANSITION_CONCLUDED",
            NoUnitAt { .. } => "TRANSITION_NO_UNIT_AT",
            NotSelectable { .. } => "TRANSITION_NOT_SELECTABLE",
            UnreachableTile { .. } => "TRANSITION_UNREACHABLE_TILE",
            NoWeapon { .. } => "TRANSITION_NO_WEAPON",
            InvalidTarget { .. } => "TRANSITION_INVALID_TARGET",
            Inventory(inner) => inner.error_code(),
            UnknownUnit { .. } => "TRANSITION_UNKNOWN_UNIT",
            Occupancy(_) => "TRANSITION_OCCUPANCY",
        }
    }
}
