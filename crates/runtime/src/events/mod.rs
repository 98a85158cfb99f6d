//! Topic-based event bus for battle events.
//!
//! Engine events are wrapped with the turn and side they happened on, then
//! published to a topic so consumers subscribe only to what they need.

mod bus;
mod log;

pub use bus::{Event, EventBus, Topic};
pub use log::EventLog;
