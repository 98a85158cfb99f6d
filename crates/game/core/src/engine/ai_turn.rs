use super::{BattleEngine, BattleEvent, TransitionError};
use crate::ai::{AiPlan, plan_unit};
use crate::state::UnitId;

/// AI turn execution.
impl<'a> BattleEngine<'a> {
    /// Units of the acting side that may still act, in roster order.
    pub fn ai_roster(&self) -> Vec<UnitId> {
        self.state
            .current()
            .map(|side| {
                side.living()
                    .filter(|unit| unit.enabled)
                    .map(|unit| unit.id)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Plans and plays one unit of the acting side.
    ///
    /// The unit moves, strikes and takes a counter exactly like a player
    /// strike would, then is disabled. Never ends the turn by itself.
    pub fn run_ai_unit(&mut self, unit: UnitId) -> Result<Vec<BattleEvent>, TransitionError> {
        self.ensure_idle("ai step")?;
        let actor = self.unit(unit)?;
        if actor.side != self.state.current_side {
            return Err(TransitionError::NotSelectable {
                unit,
                reason: "belongs to another side",
            });
        }
        if !actor.is_alive() || !actor.enabled {
            return Err(TransitionError::NotSelectable {
                unit,
                reason: "cannot act this turn",
            });
        }

        let plan = plan_unit(&*self.state, actor, self.config);
        let mut events = Vec::new();
        if plan.destination() != actor.location {
            events.push(self.relocate(unit, plan.destination())?);
        }

        match plan {
            AiPlan::Engage { target, equip, .. } => {
                if let Some(slot) = equip {
                    events.push(self.equip(unit, slot)?);
                }
                events.extend(self.strike(unit, target, false)?);
                events.extend(self.counter_if_able(unit, target)?);
            }
            AiPlan::Advance { .. } => events.push(BattleEvent::UnitWaited { unit }),
        }

        self.finish_unit(unit, events, false)
    }

    /// Plays every ready unit of the acting side, then passes the turn.
    pub fn run_ai_side(&mut self) -> Result<Vec<BattleEvent>, TransitionError> {
        self.ensure_idle("ai turn")?;
        let side = self.state.current_side;
        tracing::debug!(%side, "ai turn");

        let mut events = Vec::new();
        for unit in self.ai_roster() {
            if self.state.phase.is_concluded() {
                return Ok(events);
            }
            // Earlier strikes may have felled this unit.
            if self.state.unit(unit).is_some_and(|u| u.is_alive() && u.enabled) {
                events.extend(self.run_ai_unit(unit)?);
            }
        }

        if !self.state.phase.is_concluded() {
            events.extend(self.rotate());
        }
        Ok(events)
    }
}
