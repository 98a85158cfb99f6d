//! Battle content: line-oriented record formats and the loaders that read them.
//!
//! Every record is a plain text file of `Label: value` lines:
//! - battlefields (dimensions followed by a grid of terrain symbols)
//! - weapons, items and units
//! - level rosters placing units on a battlefield
//!
//! [`records`] parses and writes these formats without touching the disk.
//! With the `loaders` feature, [`loaders`] resolves them from a content
//! directory and assembles a ready [`game_core::BattleState`].

pub mod catalog;
pub mod error;
pub mod records;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use catalog::Catalog;
pub use error::RecordError;
pub use records::{
    DUMMY, ItemRef, LevelRecord, Placement, Record, UnitRecord, UnitSheet, parse_battlefield,
    parse_item, parse_level, parse_unit, parse_weapon, write_battlefield, write_level, write_unit,
};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentLoader, LoadResult};
