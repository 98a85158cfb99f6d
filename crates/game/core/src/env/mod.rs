//! Static battle environment: the terrain grid and the randomness source.
//!
//! Terrain never changes during a battle; occupancy is the only part of the
//! field the engine mutates.
mod map;
mod rng;

pub use map::{Field, FieldError, TerrainKind};
pub use rng::{FixedRng, PcgRng, RngOracle, compute_seed, context};
