//! Damage calculation.

use super::{Combatant, ranges_overlap};

/// Damage dealt by one landed strike.
///
/// ```text
/// damage = max(0, strength + might - defense)
/// ```
///
/// A counter from a non-overlapping weapon deals nothing.
pub fn damage(attacker: &Combatant<'_>, defender: &Combatant<'_>, counter: bool) -> u32 {
    let Some(weapon) = attacker.weapon() else {
        return 0;
    };
    if counter && !ranges_overlap(attacker, defender) {
        return 0;
    }

    let raw = i64::from(attacker.unit.stats.strength) + i64::from(weapon.might)
        - i64::from(defender.unit.stats.defense);
    u32::try_from(raw.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Location, RangeSet, SideId, Unit, UnitId, UnitStats, Weapon, WeaponKind};

    fn unit(strength: i32, defense: i32, range: RangeSet) -> Unit {
        let stats = UnitStats {
            hp_max: 20,
            strength,
            defense,
            ..UnitStats::default()
        };
        Unit::new(UnitId(1), "Unit", SideId(0), Location::ORIGIN, stats)
            .with_weapon(Weapon::new("Weapon", WeaponKind::Lance, 7, 8, range))
            .unwrap()
    }

    fn view(unit: &Unit) -> Combatant<'_> {
        Combatant {
            unit,
            terrain: None,
        }
    }

    #[test]
    fn strength_plus_might_minus_defense() {
        let attacker = unit(6, 0, RangeSet::melee());
        let defender = unit(0, 4, RangeSet::melee());
        assert_eq!(damage(&view(&attacker), &view(&defender), false), 9);
        assert_eq!(damage(&view(&attacker), &view(&defender), true), 9);
    }

    #[test]
    fn armor_floors_damage_at_zero() {
        let attacker = unit(0, 0, RangeSet::melee());
        let wall = unit(0, 30, RangeSet::melee());
        assert_eq!(damage(&view(&attacker), &view(&wall), false), 0);
    }

    #[test]
    fn non_overlapping_counter_deals_nothing() {
        let attacker = unit(10, 0, RangeSet::melee());
        let archer = unit(0, 0, RangeSet::from([2]));
        assert_eq!(damage(&view(&attacker), &view(&archer), true), 0);
    }

    #[test]
    fn extreme_stats_do_not_overflow() {
        let titan = unit(i32::MAX, 0, RangeSet::melee());
        let paper = unit(0, i32::MIN, RangeSet::melee());
        assert_eq!(damage(&view(&titan), &view(&paper), false), u32::MAX);

        let feeble = unit(i32::MIN, 0, RangeSet::melee());
        let fortress = unit(0, i32::MAX, RangeSet::melee());
        assert_eq!(damage(&view(&feeble), &view(&fortress), false), 0);
    }
}
