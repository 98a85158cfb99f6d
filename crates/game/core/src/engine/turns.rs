use super::{BattleEngine, BattleEvent, TransitionError};
use crate::state::{Phase, SideId};

/// Side rotation and victory.
impl<'a> BattleEngine<'a> {
    /// True when the acting side has no living unit left that may act.
    pub fn side_exhausted(&self) -> bool {
        self.state
            .current()
            .is_none_or(|side| !side.has_ready_units())
    }

    /// True when the side to act is AI controlled.
    pub fn is_ai_turn(&self) -> bool {
        self.state.current().is_some_and(|side| side.is_ai())
    }

    /// Ends the acting side's turn and plays every AI side that follows.
    ///
    /// Plays at most one full rotation of AI sides per call, so a battle
    /// without human sides hands control back after each rotation.
    pub fn end_turn(&mut self) -> Result<Vec<BattleEvent>, TransitionError> {
        self.ensure_idle("end turn")?;
        let mut events = self.rotate();

        for _ in 0..self.state.sides.len() {
            if self.state.phase.is_concluded() || !self.is_ai_turn() {
                break;
            }
            events.extend(self.run_ai_side()?);
        }
        Ok(events)
    }

    /// Ends the acting side's turn without playing AI sides.
    pub fn pass_turn(&mut self) -> Result<Vec<BattleEvent>, TransitionError> {
        self.ensure_idle("pass turn")?;
        Ok(self.rotate())
    }

    /// Re-enables the current side and hands over to the next side with
    /// survivors, counting a new turn whenever side 0 is passed.
    pub(super) fn rotate(&mut self) -> Vec<BattleEvent> {
        let from = self.state.current_side;
        if let Some(side) = self.state.side_mut(from) {
            for unit in &mut side.units {
                unit.enabled = true;
            }
        }

        let count = self.state.sides.len();
        let mut turn = self.state.turn;
        let mut next = None;
        for step in 1..=count {
            let raw = from.index() + step;
            if raw == count {
                turn += 1;
            }
            let index = raw % count;
            if self.state.sides[index].has_survivors() {
                next = Some(SideId(index as u8));
                break;
            }
        }

        // Nobody is left standing; keep the clock where it is.
        let Some(to) = next else {
            return Vec::new();
        };

        self.state.current_side = to;
        self.state.turn = turn;
        tracing::info!(%from, %to, turn, "turn passed");

        let mut events = vec![BattleEvent::TurnPassed { from, to, turn }];
        events.extend(self.check_victory());
        events
    }

    /// Concludes the battle once a single side has survivors.
    pub(super) fn check_victory(&mut self) -> Option<BattleEvent> {
        if self.state.phase.is_concluded() {
            return None;
        }
        let victor = self.state.victor()?;
        self.state.phase = Phase::Concluded { victor };
        tracing::info!(side = %victor, turn = self.state.turn, "victory");
        Some(BattleEvent::Victory { side: victor })
    }
}
