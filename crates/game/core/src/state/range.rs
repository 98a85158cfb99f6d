//! Discrete attack distances.

use std::collections::BTreeSet;
use std::fmt;

/// Set of distances a weapon can strike at (e.g. `{1}` for melee, `{2, 3}` for a bow).
///
/// Iteration is always in ascending order; duplicates collapse on insertion.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSet {
    distances: BTreeSet<u32>,
}

impl RangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Melee weapons strike adjacent tiles only.
    pub fn melee() -> Self {
        Self::from([1])
    }

    pub fn insert(&mut self, distance: u32) -> bool {
        self.distances.insert(distance)
    }

    pub fn contains(&self, distance: u32) -> bool {
        self.distances.contains(&distance)
    }

    /// Returns true if at least one distance is shared.
    pub fn overlaps(&self, other: &RangeSet) -> bool {
        !self.distances.is_disjoint(&other.distances)
    }

    /// Returns true if every distance in `self` is also in `other`.
    pub fn is_subset_of(&self, other: &RangeSet) -> bool {
        self.distances.is_subset(&other.distances)
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.distances.iter().copied()
    }

    pub fn min(&self) -> Option<u32> {
        self.distances.first().copied()
    }

    pub fn max(&self) -> Option<u32> {
        self.distances.last().copied()
    }

    pub fn len(&self) -> usize {
        self.distances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distances.is_empty()
    }
}

impl FromIterator<u32> for RangeSet {
    fn from_iter<T: IntoIterator<Item = u32>>(iter: T) -> Self {
        Self {
            distances: iter.into_iter().collect(),
        }
    }
}

impl<const N: usize> From<[u32; N]> for RangeSet {
    fn from(distances: [u32; N]) -> Self {
        distances.into_iter().collect()
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for distance in self.iter() {
            if !first {
                write!(f, "-")?;
            }
            write!(f, "{distance}")?;
            first = false;
        }
        Ok(())
    }
}
