//! Experience awarded to the unit that initiated a strike.

use crate::state::Unit;

/// Extra experience for a lethal strike.
pub const KILL_BONUS: i32 = 15;
/// Experience for a strike that missed.
pub const MISS_EXPERIENCE: i32 = 1;

/// Experience earned by `attacker` for one strike against `defender`.
///
/// ```text
/// hit:  10 - (attacker_level - defender_level) + weapon_weight (+15 if lethal)
/// miss: 1
/// ```
///
/// The value may be negative when a much stronger unit strikes a weak one.
pub fn experience_gain(attacker: &Unit, defender: &Unit, hit: bool, lethal: bool) -> i32 {
    if !hit {
        return MISS_EXPERIENCE;
    }
    let level_gap = i64::from(attacker.level()) - i64::from(defender.level());
    let weight = attacker.primary_weapon().map_or(0, |weapon| i64::from(weapon.weight));
    let bonus = if lethal { KILL_BONUS } else { 0 };
    let gain = 10 - level_gap + weight + i64::from(bonus);
    gain.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}
