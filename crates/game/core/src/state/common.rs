use std::fmt;

/// Index of a faction taking part in the battle.
///
/// Sides act in ascending id order; side `0` opens every turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideId(pub u8);

impl SideId {
    pub const FIRST: Self = Self(0);

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "side {}", self.0)
    }
}

/// Stable identifier for a unit, unique across every side of one battle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    pub x: i32,
    pub y: i32,
}

impl Location {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two tiles.
    pub fn distance(self, other: Location) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// The four orthogonal neighbours (right, below, left, above).
    pub fn neighbors(self) -> [Location; 4] {
        [
            Location::new(self.x + 1, self.y),
            Location::new(self.x, self.y + 1),
            Location::new(self.x - 1, self.y),
            Location::new(self.x, self.y - 1),
        ]
    }

    /// Every tile at exactly `distance` steps, in no particular bounds.
    ///
    /// Tiles whose coordinates would leave the `i32` plane are omitted; a
    /// distance beyond `i32::MAX` yields no tiles at all.
    pub fn ring(self, distance: u32) -> Vec<Location> {
        let Ok(d) = i32::try_from(distance) else {
            return Vec::new();
        };
        if d == 0 {
            return vec![self];
        }

        let offset = |dx: i32, dy: i32| {
            Some(Location::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
        };
        let mut tiles = Vec::new();
        for i in 0..d {
            let j = d - i;
            tiles.extend(offset(i, -j));
            tiles.extend(offset(j, i));
            tiles.extend(offset(-i, j));
            tiles.extend(offset(-j, -i));
        }
        tiles
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
