//! Applying strikes: damage, falls and experience.

use super::{BattleEngine, BattleEvent, TransitionError};
use crate::combat::{Combatant, can_counter, experience_gain, resolve_strike};
use crate::env::{compute_seed, context};
use crate::state::{BattleState, StatKind, UnitId};

impl<'a> BattleEngine<'a> {
    /// Resolves one strike and applies it.
    ///
    /// Only the initiating strike earns experience; counters never do.
    pub(super) fn strike(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
        counter: bool,
    ) -> Result<Vec<BattleEvent>, TransitionError> {
        let roll_context = if counter {
            context::COUNTER_HIT
        } else {
            context::HIT
        };
        let roll = self.roll(attacker, roll_context);

        let (outcome, gain) = {
            let field = &self.state.field;
            let a = self.unit(attacker)?;
            let d = self.unit(defender)?;
            let outcome = resolve_strike(
                roll,
                &Combatant::on(field, a),
                &Combatant::on(field, d),
                counter,
            );
            let gain = (!counter).then(|| experience_gain(a, d, outcome.hit, outcome.lethal));
            (outcome, gain)
        };

        tracing::debug!(
            attacker = %attacker,
            defender = %defender,
            counter,
            roll,
            hit_chance = outcome.hit_chance,
            damage = outcome.damage,
            "strike"
        );

        let mut events = vec![BattleEvent::StrikeResolved(outcome.clone())];

        let fell = self.unit_mut(defender)?.apply_damage(outcome.damage);
        if fell {
            events.push(self.vacate(defender)?);
        }
        if let Some(gain) = gain {
            events.extend(self.award_experience(attacker, gain)?);
        }
        Ok(events)
    }

    /// Strikes back if the defender survived and can reach the attacker.
    pub(super) fn counter_if_able(
        &mut self,
        attacker: UnitId,
        defender: UnitId,
    ) -> Result<Vec<BattleEvent>, TransitionError> {
        let able = {
            let field = &self.state.field;
            let a = self.unit(attacker)?;
            let d = self.unit(defender)?;
            a.is_alive() && can_counter(a.location, &Combatant::on(field, d))
        };
        if able {
            self.strike(defender, attacker, true)
        } else {
            Ok(Vec::new())
        }
    }

    /// Clears a fallen unit's tile. Runs exactly once per fall.
    fn vacate(&mut self, unit: UnitId) -> Result<BattleEvent, TransitionError> {
        let (side, location) = {
            let fallen = self.unit(unit)?;
            (fallen.side, fallen.location)
        };
        self.state.field.empty(location)?;
        tracing::info!(unit = %unit, %side, %location, "unit fell");
        Ok(BattleEvent::UnitFell {
            unit,
            side,
            location,
        })
    }

    fn award_experience(
        &mut self,
        unit: UnitId,
        amount: i32,
    ) -> Result<Vec<BattleEvent>, TransitionError> {
        let chance = self.config.level_up_chance;
        let rng = self.rng;
        let BattleState {
            sides, seed, nonce, ..
        } = &mut *self.state;
        let seed = *seed;
        let target = sides
            .iter_mut()
            .flat_map(|side| side.units.iter_mut())
            .find(|candidate| candidate.id == unit)
            .ok_or(TransitionError::UnknownUnit { unit })?;

        let level_ups = target.gain_experience(amount, chance, |stat: StatKind| {
            let roll_seed = compute_seed(seed, *nonce, unit.0, context::GROWTH + stat as u32);
            *nonce += 1;
            rng.roll_percent(roll_seed)
        });

        let mut events = vec![BattleEvent::ExperienceGained {
            unit,
            amount,
            exp: target.exp(),
        }];
        for level_up in level_ups {
            tracing::info!(unit = %unit, level = level_up.level, grown = ?level_up.grown, "level up");
            events.push(BattleEvent::LeveledUp { unit, level_up });
        }
        Ok(events)
    }
}
