//! Engagement distance helpers.

use crate::state::Unit;

/// First (slot, distance) the target's primary weapon cannot answer.
///
/// Weapons are scanned in slot order and distances in ascending order;
/// distance 0 is never a valid engagement distance.
fn first_uncontested(actor: &Unit, target: &Unit) -> Option<(usize, u32)> {
    let guard = target.primary_range();
    actor
        .weapons()
        .iter()
        .enumerate()
        .flat_map(|(slot, weapon)| weapon.range.iter().map(move |distance| (slot, distance)))
        .find(|&(_, distance)| distance != 0 && !guard.is_some_and(|range| range.contains(distance)))
}

/// Smallest distance, in slot order, from which `actor` can strike `target`
/// without a counter. `None` when every distance is contested.
pub fn optimal_attack_distance(actor: &Unit, target: &Unit) -> Option<u32> {
    first_uncontested(actor, target).map(|(_, distance)| distance)
}

/// Slot of the weapon providing [`optimal_attack_distance`].
pub fn optimal_weapon(actor: &Unit, target: &Unit) -> Option<usize> {
    first_uncontested(actor, target).map(|(slot, _)| slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Location, RangeSet, SideId, UnitId, UnitStats, Weapon, WeaponKind};

    fn armed(ranges: &[RangeSet]) -> Unit {
        let stats = UnitStats {
            hp_max: 10,
            ..UnitStats::default()
        };
        let mut unit = Unit::new(UnitId(1), "Unit", SideId(0), Location::ORIGIN, stats);
        for range in ranges {
            unit = unit
                .with_weapon(Weapon::new("Weapon", WeaponKind::Bow, 1, 1, range.clone()))
                .unwrap();
        }
        unit
    }

    #[test]
    fn finds_first_distance_the_target_cannot_answer() {
        let actor = armed(&[RangeSet::melee(), RangeSet::from([1, 2, 3])]);
        let swordsman = armed(&[RangeSet::melee()]);
        assert_eq!(optimal_attack_distance(&actor, &swordsman), Some(2));
        assert_eq!(optimal_weapon(&actor, &swordsman), Some(1));
    }

    #[test]
    fn fully_contested_yields_none() {
        let actor = armed(&[RangeSet::melee()]);
        let javelin = armed(&[RangeSet::from([1, 2])]);
        assert_eq!(optimal_attack_distance(&actor, &javelin), None);
        assert_eq!(optimal_weapon(&actor, &javelin), None);
    }

    #[test]
    fn zero_distance_is_skipped_and_unarmed_targets_answer_nothing() {
        let actor = armed(&[RangeSet::from([0, 1])]);
        let civilian = armed(&[]);
        assert_eq!(optimal_attack_distance(&actor, &civilian), Some(1));
        assert_eq!(optimal_weapon(&actor, &civilian), Some(0));
    }
}
