//! Battlefield terrain and occupancy.

use std::collections::BTreeMap;

use crate::error::{ErrorSeverity, GameError};
use crate::state::{Location, SideId};

/// Static terrain kinds. Terrain never changes during a battle.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TerrainKind {
    #[default]
    Plain,
    Forest,
    Ocean,
    Fortress,
    House,
    Mountain,
    Peak,
    Throne,
}

impl TerrainKind {
    /// Parses a single battlefield file symbol.
    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'G' => Some(Self::Plain),
            'T' => Some(Self::Forest),
            'O' => Some(Self::Ocean),
            'F' => Some(Self::Fortress),
            'H' => Some(Self::House),
            'M' => Some(Self::Mountain),
            'P' => Some(Self::Peak),
            'C' => Some(Self::Throne),
            _ => None,
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Self::Plain => 'G',
            Self::Forest => 'T',
            Self::Ocean => 'O',
            Self::Fortress => 'F',
            Self::House => 'H',
            Self::Mountain => 'M',
            Self::Peak => 'P',
            Self::Throne => 'C',
        }
    }

    /// Movement points needed to enter the tile. `None` means it cannot be entered.
    pub const fn movement_cost(self) -> Option<u32> {
        match self {
            Self::Plain | Self::Fortress | Self::House | Self::Throne => Some(1),
            Self::Forest => Some(2),
            Self::Mountain => Some(3),
            Self::Peak => Some(4),
            Self::Ocean => None,
        }
    }
}

/// Errors raised by occupancy mutation and grid construction.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldError {
    #[error("{location} is outside the {width}x{height} battlefield")]
    OutOfBounds {
        location: Location,
        width: u32,
        height: u32,
    },

    #[error("a {width}x{height} battlefield needs {expected} tiles, got {actual}")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl GameError for FieldError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            FieldError::OutOfBounds { .. } => ErrorSeverity::Validation,
            FieldError::DimensionMismatch { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            FieldError::OutOfBounds { .. } => "FIELD_OUT_OF_BOUNDS",
            FieldError::DimensionMismatch { .. } => "FIELD_DIMENSION_MISMATCH",
        }
    }
}

/// Terrain grid plus the side owning each occupied tile.
///
/// Tiles are stored row-major; `(0, 0)` is the top-left corner.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    width: u32,
    height: u32,
    terrain: Vec<TerrainKind>,
    occupancy: BTreeMap<Location, SideId>,
}

impl Field {
    /// Cost sentinel for tiles that can never be entered.
    pub const IMPASSABLE: u32 = u32::MAX;

    pub fn new(width: u32, height: u32, terrain: Vec<TerrainKind>) -> Result<Self, FieldError> {
        let expected = width as usize * height as usize;
        if terrain.len() != expected {
            return Err(FieldError::DimensionMismatch {
                width,
                height,
                expected,
                actual: terrain.len(),
            });
        }
        Ok(Self {
            width,
            height,
            terrain,
            occupancy: BTreeMap::new(),
        })
    }

    /// A field covered with a single terrain kind.
    pub fn filled(width: u32, height: u32, kind: TerrainKind) -> Self {
        Self {
            width,
            height,
            terrain: vec![kind; width as usize * height as usize],
            occupancy: BTreeMap::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Replaces the terrain of one tile. Used when authoring fields in code.
    pub fn with_terrain(mut self, location: Location, kind: TerrainKind) -> Self {
        if let Some(index) = self.index(location) {
            self.terrain[index] = kind;
        }
        self
    }

    #[inline]
    pub fn in_bounds(&self, location: Location) -> bool {
        self.index(location).is_some()
    }

    fn index(&self, location: Location) -> Option<usize> {
        let x = u32::try_from(location.x).ok()?;
        let y = u32::try_from(location.y).ok()?;
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    pub fn terrain_at(&self, location: Location) -> Option<TerrainKind> {
        self.index(location).map(|index| self.terrain[index])
    }

    /// Rows of terrain, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[TerrainKind]> + '_ {
        self.terrain.chunks(self.width.max(1) as usize)
    }

    /// True for an in-bounds tile nobody stands on.
    pub fn is_empty(&self, location: Location) -> bool {
        self.in_bounds(location) && !self.occupancy.contains_key(&location)
    }

    pub fn occupant_side(&self, location: Location) -> Option<SideId> {
        self.occupancy.get(&location).copied()
    }

    pub fn fill(&mut self, location: Location, side: SideId) -> Result<(), FieldError> {
        self.check_bounds(location)?;
        self.occupancy.insert(location, side);
        Ok(())
    }

    /// Clears a tile, returning the side that held it.
    pub fn empty(&mut self, location: Location) -> Result<Option<SideId>, FieldError> {
        self.check_bounds(location)?;
        Ok(self.occupancy.remove(&location))
    }

    fn check_bounds(&self, location: Location) -> Result<(), FieldError> {
        if self.in_bounds(location) {
            Ok(())
        } else {
            Err(FieldError::OutOfBounds {
                location,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Cost for a unit of `side` to enter `location`.
    ///
    /// Out-of-bounds tiles, ocean and tiles held by another side return
    /// [`Field::IMPASSABLE`]. Allied tiles cost their terrain.
    pub fn terrain_cost(&self, location: Location, side: SideId) -> u32 {
        let Some(kind) = self.terrain_at(location) else {
            return Self::IMPASSABLE;
        };
        match self.occupant_side(location) {
            Some(occupant) if occupant != side => Self::IMPASSABLE,
            _ => kind.movement_cost().unwrap_or(Self::IMPASSABLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn symbols_round_trip() {
        for kind in TerrainKind::iter() {
            assert_eq!(TerrainKind::from_symbol(kind.symbol()), Some(kind));
        }
        assert_eq!(TerrainKind::from_symbol('X'), None);
    }

    #[test]
    fn cost_blocks_ocean_bounds_and_enemies_only() {
        let mut field = Field::filled(3, 2, TerrainKind::Plain)
            .with_terrain(Location::new(1, 0), TerrainKind::Ocean)
            .with_terrain(Location::new(2, 0), TerrainKind::Mountain);
        field.fill(Location::new(0, 1), SideId(0)).unwrap();
        field.fill(Location::new(1, 1), SideId(1)).unwrap();

        let me = SideId(0);
        assert_eq!(field.terrain_cost(Location::new(0, 0), me), 1);
        assert_eq!(field.terrain_cost(Location::new(1, 0), me), Field::IMPASSABLE);
        assert_eq!(field.terrain_cost(Location::new(2, 0), me), 3);
        assert_eq!(field.terrain_cost(Location::new(0, 1), me), 1);
        assert_eq!(field.terrain_cost(Location::new(1, 1), me), Field::IMPASSABLE);
        assert_eq!(field.terrain_cost(Location::new(-1, 0), me), Field::IMPASSABLE);
        assert_eq!(field.terrain_cost(Location::new(0, 2), me), Field::IMPASSABLE);
    }

    #[test]
    fn occupancy_mutation_checks_bounds() {
        let mut field = Field::filled(2, 2, TerrainKind::Plain);
        let outside = Location::new(2, 0);
        assert!(matches!(field.fill(outside, SideId(0)), Err(FieldError::OutOfBounds { .. })));
        assert!(field.empty(outside).is_err());
        assert!(!field.is_empty(outside));

        let tile = Location::new(1, 1);
        field.fill(tile, SideId(1)).unwrap();
        assert!(!field.is_empty(tile));
        assert_eq!(field.empty(tile), Ok(Some(SideId(1))));
        assert!(field.is_empty(tile));
        assert_eq!(field.empty(tile), Ok(None));
    }

    #[test]
    fn construction_checks_tile_count() {
        let err = Field::new(2, 2, vec![TerrainKind::Plain; 3]).unwrap_err();
        assert_eq!(
            err,
            FieldError::DimensionMismatch {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3
            }
        );
    }
}
