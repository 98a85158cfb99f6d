//! Unified error types surfaced by the runtime.

use game_core::TransitionError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("event log {0} already exists")]
    LogAlreadyExists(String),

    #[error("event log I/O failed")]
    Io(#[from] std::io::Error),

    #[error("event log entry is not valid JSON")]
    Json(#[from] serde_json::Error),
}
