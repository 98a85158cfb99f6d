//! Decision making for AI-controlled units.
//!
//! [`plan_unit`] picks a target with [`select_target`], then chooses the
//! weapon and the tile to strike from. The plan is pure; the engine carries
//! it out through the same paths as player input.

mod engagement;
mod scoring;

pub use engagement::{optimal_attack_distance, optimal_weapon};
pub use scoring::{
    COUNTER_SAFETY_BONUS, FALLEN_SCORE, REACH_BONUS, TargetScore, score_targets, select_target,
};

use crate::config::GameConfig;
use crate::movement::movement_range;
use crate::state::{BattleState, Location, Unit, UnitId, Weapon};

/// What an AI unit will do this turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AiPlan {
    /// Move to `destination` and strike `target`, first equipping `equip` if set.
    Engage {
        target: UnitId,
        equip: Option<usize>,
        destination: Location,
    },
    /// Move to `destination` (possibly staying put) and wait.
    Advance {
        target: Option<UnitId>,
        destination: Location,
    },
}

impl AiPlan {
    pub fn destination(&self) -> Location {
        match self {
            AiPlan::Engage { destination, .. } | AiPlan::Advance { destination, .. } => *destination,
        }
    }
}

/// Plans the turn of `actor` against every unit of the other sides.
pub fn plan_unit(state: &BattleState, actor: &Unit, config: &GameConfig) -> AiPlan {
    let hold = AiPlan::Advance {
        target: None,
        destination: actor.location,
    };

    let candidates: Vec<&Unit> = state.enemies_of(actor.side).collect();
    let Some((target_id, score)) =
        select_target(state, actor, &candidates, config.ai_reach_threshold)
    else {
        return hold;
    };
    let Some(target) = state.unit(target_id) else {
        return hold;
    };

    let movement = movement_range(&state.field, actor.location, actor.side, actor.movement_budget());
    let stops: Vec<(Location, u32)> = movement
        .destinations(&state.field)
        .into_iter()
        .map(|tile| (tile, movement.cost_to(tile).unwrap_or(0)))
        .collect();
    let reaches_from_somewhere =
        |weapon: &Weapon| stops.iter().any(|&(tile, _)| weapon.reaches(tile.distance(target.location)));

    // Prefer the weapon the target cannot answer, when it is usable this turn.
    let optimal = optimal_weapon(actor, target).filter(|&slot| {
        actor.weapons().get(slot).is_some_and(|weapon| {
            actor.can_wield(weapon.kind) && reaches_from_somewhere(weapon)
        })
    });
    let (equip, weapon, preferred) = match (optimal, actor.primary_weapon()) {
        (Some(slot), _) => (
            (slot != 0).then_some(slot),
            &actor.weapons()[slot],
            optimal_attack_distance(actor, target),
        ),
        (None, Some(primary)) if reaches_from_somewhere(primary) => (None, primary, None),
        _ => {
            let destination = stops
                .iter()
                .min_by_key(|&&(tile, cost)| (tile.distance(target.location), cost, tile))
                .map_or(actor.location, |&(tile, _)| tile);
            tracing::debug!(actor = %actor.id, target = %target_id, %destination, "advancing");
            return AiPlan::Advance {
                target: Some(target_id),
                destination,
            };
        }
    };

    let destination = stops
        .iter()
        .filter(|&&(tile, _)| weapon.reaches(tile.distance(target.location)))
        .min_by_key(|&&(tile, cost)| {
            let off_preferred = preferred.is_some_and(|d| tile.distance(target.location) != d);
            (off_preferred, cost, tile)
        })
        .map_or(actor.location, |&(tile, _)| tile);

    tracing::debug!(
        actor = %actor.id,
        target = %target_id,
        score,
        weapon = %weapon.name,
        %destination,
        "engaging"
    );
    AiPlan::Engage {
        target: target_id,
        equip,
        destination,
    }
}
