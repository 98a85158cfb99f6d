//! Async orchestration around the battle engine.
//!
//! [`BattleSession`] owns a battle and its randomness, forwards player input
//! to the engine, paces AI turns and publishes every engine event on an
//! [`EventBus`]. Modules are organized by responsibility:
//! - [`config`] holds the session settings
//! - [`events`] provides the topic-based bus and an append-only event log
//! - [`session`] hosts the session itself
pub mod config;
pub mod error;
pub mod events;
pub mod session;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, EventLog, Topic};
pub use session::{BattleSession, SessionOutcome};
