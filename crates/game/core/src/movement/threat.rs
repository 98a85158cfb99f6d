use std::collections::BTreeSet;

use super::movement_range;
use crate::env::Field;
use crate::state::{Location, RangeSet, Unit};

/// In-bounds tiles at any distance in `range` from `from`.
///
/// Distances longer than any path across the field contribute nothing.
pub fn attack_range_from(field: &Field, from: Location, range: &RangeSet) -> BTreeSet<Location> {
    if !field.in_bounds(from) {
        return BTreeSet::new();
    }
    let span = field.width().saturating_add(field.height());
    range
        .iter()
        .take_while(|&distance| distance <= span)
        .flat_map(|distance| from.ring(distance))
        .filter(|&tile| field.in_bounds(tile))
        .collect()
}

/// Tiles `unit` could strike this turn after moving anywhere it may stop.
///
/// Uses the primary weapon only. A unit without a weapon threatens nothing.
pub fn threat_range(field: &Field, unit: &Unit) -> BTreeSet<Location> {
    let Some(range) = unit.primary_range() else {
        return BTreeSet::new();
    };

    movement_range(field, unit.location, unit.side, unit.movement_budget())
        .destinations(field)
        .into_iter()
        .flat_map(|stop| attack_range_from(field, stop, range))
        .collect()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{SideId, UnitId, UnitStats, Weapon, WeaponKind};

    fn fighter(at: Location, movement: i32, range: RangeSet) -> Unit {
        let stats = UnitStats {
            hp_max: 10,
            movement,
            ..UnitStats::default()
        };
        Unit::new(UnitId(1), "Fighter", SideId(0), at, stats)
            .with_weapon(Weapon::new("Test", WeaponKind::Sword, 1, 1, range))
            .unwrap()
    }

    #[test]
    fn melee_threat_extends_one_tile_past_movement() {
        let field = Field::filled(5, 5, TerrainKind::Plain);
        let unit = fighter(Location::ORIGIN, 2, RangeSet::melee());
        let threat = threat_range(&field, &unit);

        assert!(threat.contains(&Location::new(2, 0)));
        assert!(threat.contains(&Location::new(3, 0)));
        assert!(!threat.contains(&Location::new(4, 0)));
        assert!(threat.iter().all(|&tile| field.in_bounds(tile)));
    }

    #[test]
    fn unarmed_unit_threatens_nothing() {
        let field = Field::filled(3, 3, TerrainKind::Plain);
        let stats = UnitStats {
            hp_max: 10,
            movement: 3,
            ..UnitStats::default()
        };
        let unit = Unit::new(UnitId(1), "Civilian", SideId(0), Location::ORIGIN, stats);
        assert!(threat_range(&field, &unit).is_empty());
    }

    #[test]
    fn bow_skips_adjacent_tiles() {
        let field = Field::filled(5, 5, TerrainKind::Plain);
        let unit = fighter(Location::new(2, 2), 0, RangeSet::from([2]));
        let threat = threat_range(&field, &unit);
        assert!(!threat.contains(&Location::new(2, 1)));
        assert!(threat.contains(&Location::new(2, 0)));
        assert!(threat.contains(&Location::new(3, 3)));
        assert_eq!(threat.len(), 8);
    }

    #[test]
    fn ranges_longer_than_the_field_are_ignored() {
        let field = Field::filled(5, 5, TerrainKind::Plain);
        let unit = fighter(Location::ORIGIN, 0, RangeSet::from([1, 100_000_000, 3_000_000_000]));

        let threat = threat_range(&field, &unit);
        assert_eq!(
            threat,
            BTreeSet::from([Location::new(1, 0), Location::new(0, 1)])
        );
        assert_eq!(
            attack_range_from(&field, Location::new(4, 4), &RangeSet::from([u32::MAX])),
            BTreeSet::new()
        );
    }

    proptest! {
        #[test]
        fn threat_grows_with_budget_and_range(
            x in 0i32..6,
            y in 0i32..6,
            budget in 0i32..5,
            extra in 0i32..3,
            far in 2u32..4,
        ) {
            let field = Field::filled(6, 6, TerrainKind::Plain)
                .with_terrain(Location::new(3, 3), TerrainKind::Forest)
                .with_terrain(Location::new(1, 4), TerrainKind::Ocean);
            let at = Location::new(x, y);

            let base = fighter(at, budget, RangeSet::melee());
            let base_threat = threat_range(&field, &base);
            prop_assert!(base_threat.is_superset(&attack_range_from(&field, at, &RangeSet::melee())));

            let quicker = fighter(at, budget + extra, RangeSet::melee());
            prop_assert!(threat_range(&field, &quicker).is_superset(&base_threat));

            let longer = fighter(at, budget, RangeSet::from([1, far]));
            prop_assert!(threat_range(&field, &longer).is_superset(&base_threat));
        }
    }
}
