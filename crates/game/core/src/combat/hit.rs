//! Hit chance calculations.

use super::Combatant;
use crate::env::TerrainKind;

const BASE_HIT: i64 = 100;
const FOREST_COVER: i64 = 15;
const TRIANGLE_BONUS: i64 = 10;

/// True when both primary weapons share at least one distance.
pub fn ranges_overlap(a: &Combatant<'_>, b: &Combatant<'_>) -> bool {
    match (a.weapon(), b.weapon()) {
        (Some(a), Some(b)) => a.range.overlaps(&b.range),
        _ => false,
    }
}

/// Percent chance for `attacker` to land a strike on `defender`.
///
/// # Formula
///
/// ```text
/// hit = clamp(100 + 2 * skill - weapon_weight - defender_speed, 0, 100)
///       - 15 if the defender stands in forest
///       + 10 if the attacker's weapon beats the defender's
///       - 10 if the attacker's weapon loses to the defender's
/// ```
///
/// A counter from a weapon whose range does not overlap the attacker's is
/// forced to 0. The result is always within `[0, 100]`. Without a weapon the
/// attacker cannot hit at all.
pub fn hit_chance(attacker: &Combatant<'_>, defender: &Combatant<'_>, counter: bool) -> u32 {
    let Some(weapon) = attacker.weapon() else {
        return 0;
    };
    if counter && !ranges_overlap(attacker, defender) {
        return 0;
    }

    // Record values span the whole i32 range; i64 holds any combination.
    let mut hit = (BASE_HIT + 2 * i64::from(attacker.unit.stats.skill)
        - i64::from(weapon.weight)
        - i64::from(defender.unit.stats.speed))
    .clamp(0, BASE_HIT);

    if defender.terrain == Some(TerrainKind::Forest) {
        hit -= FOREST_COVER;
    }
    if let Some(guard) = defender.weapon() {
        if weapon.kind.beats(guard.kind) {
            hit += TRIANGLE_BONUS;
        }
        if weapon.kind.loses_to(guard.kind) {
            hit -= TRIANGLE_BONUS;
        }
    }

    hit.clamp(0, BASE_HIT) as u32
}
