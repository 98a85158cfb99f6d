//! Target scoring.
//!
//! Each candidate enemy accumulates an integer score from four rules applied
//! in a fixed order:
//!
//! 1. **Reach**: +1000 when the candidate stands in the actor's threat range.
//! 2. **Counter safety**: +500 for every weapon of the actor whose range is not
//!    covered by the candidate's primary weapon range.
//! 3. **HP rank**: candidates are ranked by HP and every ranked candidate gets
//!    `(N - 1) - 1`, so the rank never separates candidates.
//! 4. **Alive**: fallen candidates are overwritten to -1.
//!
//! The best score wins (first candidate on ties); below the reach threshold
//! the actor declines to engage.

use std::collections::BTreeSet;

use crate::movement::threat_range;
use crate::state::{BattleState, Location, RangeSet, Unit, UnitId};

pub const REACH_BONUS: i64 = 1000;
pub const COUNTER_SAFETY_BONUS: i64 = 500;
pub const FALLEN_SCORE: i64 = -1;

/// Score of one candidate with its breakdown, for logging and tests.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TargetScore {
    pub candidate: UnitId,
    pub reach: i64,
    pub counter_safety: i64,
    pub hp_rank: i64,
    pub alive: bool,
}

impl TargetScore {
    pub fn value(&self) -> i64 {
        if self.alive {
            self.reach + self.counter_safety + self.hp_rank
        } else {
            FALLEN_SCORE
        }
    }
}

/// Scores every candidate against `actor`, in candidate order.
pub fn score_targets(state: &BattleState, actor: &Unit, candidates: &[&Unit]) -> Vec<TargetScore> {
    let threat = threat_range(&state.field, actor);
    score_with_threat(actor, &threat, candidates)
}

fn score_with_threat(
    actor: &Unit,
    threat: &BTreeSet<Location>,
    candidates: &[&Unit],
) -> Vec<TargetScore> {
    let empty = RangeSet::new();
    let hp_bonus = hp_rank_bonus(candidates);

    candidates
        .iter()
        .map(|candidate| {
            let reach = if threat.contains(&candidate.location) {
                REACH_BONUS
            } else {
                0
            };
            let guard = candidate.primary_range().unwrap_or(&empty);
            let uncovered = actor
                .weapons()
                .iter()
                .filter(|weapon| !weapon.range.is_subset_of(guard))
                .count() as i64;

            TargetScore {
                candidate: candidate.id,
                reach,
                counter_safety: uncovered * COUNTER_SAFETY_BONUS,
                hp_rank: hp_bonus,
                alive: candidate.is_alive(),
            }
        })
        .collect()
}

/// Ranks candidates by HP and returns the bonus every ranked candidate receives.
fn hp_rank_bonus(candidates: &[&Unit]) -> i64 {
    let mut rank: Vec<&Unit> = Vec::with_capacity(candidates.len());
    for &candidate in candidates {
        match rank.iter().position(|ranked| ranked.hp() > candidate.hp()) {
            Some(index) => rank.insert(index + 1, candidate),
            None => rank.insert(0, candidate),
        }
    }
    tracing::debug!(
        rank = ?rank.iter().map(|unit| (unit.id.0, unit.hp())).collect::<Vec<_>>(),
        "hp rank"
    );

    let max_bonus = candidates.len() as i64 - 1;
    max_bonus - 1
}

/// Picks the highest scoring candidate, or `None` when it scores below `threshold`.
pub fn select_target(
    state: &BattleState,
    actor: &Unit,
    candidates: &[&Unit],
    threshold: i64,
) -> Option<(UnitId, i64)> {
    let scores = score_targets(state, actor, candidates);

    let mut best: Option<&TargetScore> = None;
    for score in &scores {
        tracing::debug!(
            actor = %actor.id,
            candidate = %score.candidate,
            reach = score.reach,
            counter_safety = score.counter_safety,
            hp_rank = score.hp_rank,
            alive = score.alive,
            total = score.value(),
            "target score"
        );
        if best.is_none_or(|current| score.value() > current.value()) {
            best = Some(score);
        }
    }

    let best = best?;
    if best.value() < threshold {
        tracing::debug!(actor = %actor.id, best = best.value(), threshold, "no target in reach");
        return None;
    }
    Some((best.candidate, best.value()))
}
