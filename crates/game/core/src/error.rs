//! Error classification shared by every crate in the workspace.
//!
//! Each domain error ([`FieldError`](crate::FieldError),
//! [`InventoryError`](crate::InventoryError),
//! [`TransitionError`](crate::TransitionError), ...) sits beside the code that
//! raises it. Implementing [`GameError`] lets drivers decide whether to
//! re-prompt the player, log a bug or abandon the battle.

/// How a failed request affects the battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// The player may retry with another choice: a target out of reach, a
    /// used-up item.
    Recoverable,

    /// The input does not fit the current phase or slot layout.
    Validation,

    /// Engine bookkeeping disagrees with itself, e.g. occupancy out of sync
    /// with unit locations.
    Internal,

    /// The battle cannot go on: it has concluded or its content is unusable.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Whether the state is untouched and the player can simply pick again.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Classification hooks for domain errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable, upper-case identifier such as `FIELD_OUT_OF_BOUNDS`.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
