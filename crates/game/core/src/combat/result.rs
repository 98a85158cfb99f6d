//! Strike resolution and pre-battle forecasts.

use super::{Combatant, damage, hit_chance};
use crate::state::{Location, UnitId};

/// Result of one strike, primary or counter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrikeOutcome {
    pub attacker: UnitId,
    pub defender: UnitId,
    pub counter: bool,
    /// Percentage roll in `[0, 100)`.
    pub roll: u32,
    pub hit_chance: u32,
    pub hit: bool,
    /// Damage applied; 0 on a miss.
    pub damage: u32,
    /// Defender's HP after the strike.
    pub defender_hp: i32,
    pub lethal: bool,
}

/// Resolves a strike against `roll`: it lands when `roll < hit_chance`.
///
/// The returned outcome describes the effect; the caller applies it.
pub fn resolve_strike(
    roll: u32,
    attacker: &Combatant<'_>,
    defender: &Combatant<'_>,
    counter: bool,
) -> StrikeOutcome {
    let chance = hit_chance(attacker, defender, counter);
    let hit = roll < chance;
    let dealt = if hit {
        damage(attacker, defender, counter)
    } else {
        0
    };
    let remaining = (i64::from(defender.unit.hp()) - i64::from(dealt)).max(0) as i32;

    StrikeOutcome {
        attacker: attacker.unit.id,
        defender: defender.unit.id,
        counter,
        roll,
        hit_chance: chance,
        hit,
        damage: dealt,
        defender_hp: remaining,
        lethal: hit && remaining == 0 && defender.unit.is_alive(),
    }
}

/// Whether `defender` may strike back at `attacker` from where both stand.
pub fn can_counter(attacker_at: Location, defender: &Combatant<'_>) -> bool {
    defender.unit.is_alive()
        && defender
            .weapon()
            .is_some_and(|weapon| weapon.reaches(attacker_at.distance(defender.location())))
}

/// Numbers shown before committing to a strike.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Forecast {
    pub hit_chance: u32,
    pub damage: u32,
    /// `None` when the defender cannot strike back from its tile.
    pub counter: Option<CounterForecast>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CounterForecast {
    pub hit_chance: u32,
    pub damage: u32,
}

pub fn forecast(attacker: &Combatant<'_>, defender: &Combatant<'_>) -> Forecast {
    let counter = can_counter(attacker.location(), defender).then(|| CounterForecast {
        hit_chance: hit_chance(defender, attacker, true),
        damage: damage(defender, attacker, true),
    });
    Forecast {
        hit_chance: hit_chance(attacker, defender, false),
        damage: damage(attacker, defender, false),
        counter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::TerrainKind;
    use crate::state::{RangeSet, SideId, Unit, UnitStats, Weapon, WeaponKind};

    fn unit(id: u32, at: Location, hp: i32, range: RangeSet) -> Unit {
        let stats = UnitStats {
            hp_max: hp,
            strength: 5,
            skill: 5,
            ..UnitStats::default()
        };
        Unit::new(UnitId(id), "Unit", SideId(0), at, stats)
            .with_weapon(Weapon::new("Weapon", WeaponKind::Sword, 5, 5, range))
            .unwrap()
    }

    fn view(unit: &Unit) -> Combatant<'_> {
        Combatant {
            unit,
            terrain: Some(TerrainKind::Plain),
        }
    }

    #[test]
    fn roll_must_be_below_hit_chance() {
        let attacker = unit(1, Location::ORIGIN, 20, RangeSet::melee());
        let mut defender = unit(2, Location::new(1, 0), 20, RangeSet::melee());
        defender.stats.speed = 15;
        // 100 + 10 - 5 - 15 = 90
        let landed = resolve_strike(89, &view(&attacker), &view(&defender), false);
        assert!(landed.hit);
        assert_eq!(landed.damage, 10);
        assert_eq!(landed.defender_hp, 10);
        assert!(!landed.lethal);

        let missed = resolve_strike(90, &view(&attacker), &view(&defender), false);
        assert!(!missed.hit);
        assert_eq!(missed.damage, 0);
        assert_eq!(missed.defender_hp, 20);
    }

    #[test]
    fn lethal_when_hp_runs_out() {
        let attacker = unit(1, Location::ORIGIN, 20, RangeSet::melee());
        let defender = unit(2, Location::new(1, 0), 8, RangeSet::melee());
        let outcome = resolve_strike(0, &view(&attacker), &view(&defender), false);
        assert!(outcome.lethal);
        assert_eq!(outcome.defender_hp, 0);
    }

    #[test]
    fn counter_requires_reach_from_defender_tile() {
        let archer = unit(1, Location::ORIGIN, 20, RangeSet::from([2]));
        let swordsman = unit(2, Location::new(2, 0), 20, RangeSet::melee());
        assert!(!can_counter(archer.location, &view(&swordsman)));
        assert!(can_counter(swordsman.location, &view(&archer)));

        let forecast = forecast(&view(&archer), &view(&swordsman));
        assert_eq!(forecast.counter, None);
        assert_eq!(forecast.damage, 10);
    }

    #[test]
    fn fallen_defender_never_counters() {
        let attacker = unit(1, Location::ORIGIN, 20, RangeSet::melee());
        let mut defender = unit(2, Location::new(1, 0), 5, RangeSet::melee());
        defender.apply_damage(5);
        assert!(!can_counter(attacker.location, &view(&defender)));
    }
}
