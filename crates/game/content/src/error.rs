//! Errors raised while reading records.

use game_core::{ErrorSeverity, FieldError, GameError};

/// A record that could not be understood.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` expects a number, got `{value}`")]
    InvalidNumber { field: String, value: String },

    #[error("unknown terrain symbol `{symbol}`")]
    UnknownTerrain { symbol: char },

    #[error("unknown weapon kind `{value}`")]
    UnknownWeaponKind { value: String },

    #[error("unknown stat `{value}`")]
    UnknownStat { value: String },

    #[error("battlefield declares {expected} tiles but lists {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("no weapon named `{name}`")]
    UnknownWeapon { name: String },

    #[error("no item named `{name}`")]
    UnknownItem { name: String },

    #[error("field `{field}` must be below {limit}, got {value}")]
    OutOfRange { field: String, value: u32, limit: u32 },

    /// A unit record lists more equipment than its slots hold.
    #[error("no free slot left for `{name}`")]
    SlotsFull { name: String },

    /// A roster line that is not `side unit x y`.
    #[error("line {line} is malformed: `{content}`")]
    MalformedLine { line: usize, content: String },

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl RecordError {
    pub(crate) fn missing(field: &str) -> Self {
        Self::MissingField {
            field: field.to_owned(),
        }
    }

    pub(crate) fn number(field: &str, value: &str) -> Self {
        Self::InvalidNumber {
            field: field.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl GameError for RecordError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            RecordError::UnknownWeapon { .. } | RecordError::UnknownItem { .. } => {
                ErrorSeverity::Validation
            }
            RecordError::Field(err) => err.severity(),
            _ => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        use RecordError::*;
        match self {
            MissingField { .. } => "RECORD_MISSING_FIELD",
            InvalidNumber { .. } => "RECORD_INVALID_NUMBER",
            UnknownTerrain { .. } => "RECORD_UNKNOWN_TERRAIN",
            UnknownWeaponKind { .. } => "RECORD_UNKNOWN_WEAPON_KIND",
            UnknownStat { .. } => "RECORD_UNKNOWN_STAT",
            OutOfRange { .. } => "RECORD_OUT_OF_RANGE",
            DimensionMismatch { .. } => "RECORD_DIMENSION_MISMATCH",
            UnknownWeapon { .. } => "RECORD_UNKNOWN_WEAPON",
            UnknownItem { .. } => "RECORD_UNKNOWN_ITEM",
            SlotsFull { .. } => "RECORD_SLOTS_FULL",
            MalformedLine { .. } => "RECORD_MALFORMED_LINE",
            Field(err) => err.error_code(),
        }
    }
}
