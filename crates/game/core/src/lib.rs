//! Deterministic rules for turn-based tactical battles.
//!
//! `game-core` defines the battle model (field, units, weapons, items), the
//! movement and threat calculators, the combat formulas, the AI target
//! selector and the battle state machine. It performs no I/O. All state
//! mutation flows through [`engine::BattleEngine`]; loaders and runtimes
//! depend on the types re-exported here.
pub mod ai;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod movement;
pub mod state;

pub use ai::{AiPlan, optimal_attack_distance, optimal_weapon, plan_unit, select_target};
pub use combat::{Combatant, Forecast, StrikeOutcome};
pub use config::GameConfig;
pub use engine::{BattleEngine, BattleEvent, Command, Input, TransitionError};
pub use env::{Field, FieldError, FixedRng, PcgRng, RngOracle, TerrainKind};
pub use error::{ErrorSeverity, GameError};
pub use movement::{MovementRange, attack_range_from, movement_range, threat_range};
pub use state::{
    BattleState, Controller, InventoryError, Item, ItemUse, LevelUp, Location, Phase, RangeSet,
    Side, SideId, StatKind, StateError, Unit, UnitId, UnitStats, UnitStatus, Weapon, WeaponKind,
};
