//! Cost-bounded reachability over the battlefield.
//!
//! Movement uses a frontier search keyed by accumulated terrain cost, so each
//! tile is expanded at most once through its cheapest path.

mod threat;

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

pub use threat::{attack_range_from, threat_range};

use crate::env::Field;
use crate::state::{Location, SideId};

/// Tiles a unit can reach this turn with the cheapest cost to each.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementRange {
    origin: Location,
    costs: BTreeMap<Location, u32>,
}

impl MovementRange {
    pub fn origin(&self) -> Location {
        self.origin
    }

    /// True if the tile can be entered (or passed through) within budget.
    pub fn contains(&self, location: Location) -> bool {
        self.costs.contains_key(&location)
    }

    pub fn cost_to(&self, location: Location) -> Option<u32> {
        self.costs.get(&location).copied()
    }

    /// Every reached tile in location order, origin included.
    pub fn tiles(&self) -> impl Iterator<Item = Location> + '_ {
        self.costs.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.costs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Tiles the unit may stop on: its own tile plus every reached empty tile.
    ///
    /// Allied tiles can be crossed but never ended on.
    pub fn destinations(&self, field: &Field) -> Vec<Location> {
        self.costs
            .keys()
            .copied()
            .filter(|&tile| tile == self.origin || field.is_empty(tile))
            .collect()
    }

    pub fn can_stop_at(&self, field: &Field, location: Location) -> bool {
        location == self.origin || (self.contains(location) && field.is_empty(location))
    }
}

/// Reachable tiles for a unit of `side` standing on `origin` with `budget` points.
///
/// The origin is always included at cost 0, even when its own terrain would be
/// impassable. A neighbour is admitted when its terrain cost fits the remaining
/// budget and improves on the best cost seen for it so far.
pub fn movement_range(field: &Field, origin: Location, side: SideId, budget: u32) -> MovementRange {
    let mut costs = BTreeMap::from([(origin, 0)]);
    let mut frontier = BinaryHeap::from([Reverse((0u32, origin))]);

    while let Some(Reverse((cost, tile))) = frontier.pop() {
        // Stale entry: a cheaper path already expanded this tile.
        if costs.get(&tile).is_some_and(|&best| cost > best) {
            continue;
        }

        for neighbor in tile.neighbors() {
            let step = field.terrain_cost(neighbor, side);
            if step == Field::IMPASSABLE {
                continue;
            }
            let next = cost.saturating_add(step);
            if next > budget {
                continue;
            }
            if costs.get(&neighbor).is_none_or(|&best| next < best) {
                costs.insert(neighbor, next);
                frontier.push(Reverse((next, neighbor)));
            }
        }
    }

    MovementRange { origin, costs }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::env::TerrainKind;

    const ME: SideId = SideId(0);
    const THEM: SideId = SideId(1);

    #[test]
    fn zero_budget_yields_only_origin() {
        let field = Field::filled(3, 3, TerrainKind::Plain);
        let range = movement_range(&field, Location::new(1, 1), ME, 0);
        assert_eq!(range.tiles().collect::<Vec<_>>(), vec![Location::new(1, 1)]);
        assert_eq!(range.cost_to(Location::new(1, 1)), Some(0));
    }

    #[test]
    fn impassable_origin_still_holds_its_tile() {
        let field = Field::filled(3, 3, TerrainKind::Ocean);
        let range = movement_range(&field, Location::new(1, 1), ME, 5);
        assert_eq!(range.len(), 1);
        assert!(range.contains(Location::new(1, 1)));
    }

    #[test]
    fn forest_costs_two() {
        let field = Field::filled(4, 1, TerrainKind::Plain)
            .with_terrain(Location::new(1, 0), TerrainKind::Forest);
        let range = movement_range(&field, Location::ORIGIN, ME, 3);

        assert_eq!(range.cost_to(Location::new(1, 0)), Some(2));
        assert_eq!(range.cost_to(Location::new(2, 0)), Some(3));
        assert!(!range.contains(Location::new(3, 0)));
    }

    #[test]
    fn cheaper_detour_wins() {
        // G M G
        // G G G
        let field = Field::filled(3, 2, TerrainKind::Plain)
            .with_terrain(Location::new(1, 0), TerrainKind::Mountain);
        let range = movement_range(&field, Location::ORIGIN, ME, 4);
        assert_eq!(range.cost_to(Location::new(1, 0)), Some(3));
        assert_eq!(range.cost_to(Location::new(2, 0)), Some(4));
    }

    #[test]
    fn enemies_block_allies_do_not() {
        let mut field = Field::filled(4, 1, TerrainKind::Plain);
        field.fill(Location::new(1, 0), ME).unwrap();

        let range = movement_range(&field, Location::ORIGIN, ME, 3);
        assert!(range.contains(Location::new(3, 0)));
        assert!(!range.can_stop_at(&field, Location::new(1, 0)));
        assert!(range.can_stop_at(&field, Location::new(2, 0)));
        assert!(!range.destinations(&field).contains(&Location::new(1, 0)));

        let range = movement_range(&field, Location::new(2, 0), THEM, 3);
        assert!(!range.contains(Location::new(1, 0)));
        assert!(!range.contains(Location::ORIGIN));
    }

    /// Exhaustive relaxation used as the reference for minimum path costs.
    fn reference_costs(field: &Field, origin: Location, side: SideId) -> BTreeMap<Location, u32> {
        let mut best = BTreeMap::from([(origin, 0u32)]);
        loop {
            let mut changed = false;
            for (tile, cost) in best.clone() {
                for neighbor in tile.neighbors() {
                    let step = field.terrain_cost(neighbor, side);
                    if step == Field::IMPASSABLE {
                        continue;
                    }
                    let next = cost + step;
                    if best.get(&neighbor).is_none_or(|&b| next < b) {
                        best.insert(neighbor, next);
                        changed = true;
                    }
                }
            }
            if !changed {
                return best;
            }
        }
    }

    fn terrain() -> impl Strategy<Value = TerrainKind> {
        prop_oneof![
            4 => Just(TerrainKind::Plain),
            2 => Just(TerrainKind::Forest),
            1 => Just(TerrainKind::Mountain),
            1 => Just(TerrainKind::Peak),
            1 => Just(TerrainKind::Ocean),
        ]
    }

    proptest! {
        #[test]
        fn reachable_set_matches_minimum_costs(
            tiles in proptest::collection::vec(terrain(), 25),
            enemy in proptest::option::of((0i32..5, 0i32..5)),
            budget in 0u32..12,
        ) {
            let mut field = Field::new(5, 5, tiles).unwrap();
            let origin = Location::new(2, 2);
            if let Some((x, y)) = enemy {
                let tile = Location::new(x, y);
                if tile != origin {
                    field.fill(tile, THEM).unwrap();
                }
            }

            let range = movement_range(&field, origin, ME, budget);
            let reference = reference_costs(&field, origin, ME);

            for (tile, cost) in &reference {
                if *cost <= budget {
                    prop_assert_eq!(range.cost_to(*tile), Some(*cost));
                } else {
                    prop_assert!(!range.contains(*tile));
                }
            }
            prop_assert!(range.tiles().all(|tile| reference.contains_key(&tile)));
        }
    }
}
