use crate::combat::{Forecast, StrikeOutcome};
use crate::state::{ItemUse, LevelUp, Location, SideId, UnitId};

/// Observable effect of a transition, in the order it happened.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum BattleEvent {
    UnitSelected {
        unit: UnitId,
        destinations: Vec<Location>,
    },
    SelectionCleared {
        unit: UnitId,
    },
    UnitMoved {
        unit: UnitId,
        from: Location,
        to: Location,
    },
    MoveUndone {
        unit: UnitId,
        from: Location,
        to: Location,
    },
    WeaponEquipped {
        unit: UnitId,
        weapon: String,
        slot: usize,
    },
    WeaponOrderRestored {
        unit: UnitId,
        slot: usize,
    },
    TargetChosen {
        unit: UnitId,
        target: UnitId,
        forecast: Forecast,
    },
    StrikeResolved(StrikeOutcome),
    UnitFell {
        unit: UnitId,
        side: SideId,
        location: Location,
    },
    ExperienceGained {
        unit: UnitId,
        amount: i32,
        exp: u32,
    },
    LeveledUp {
        unit: UnitId,
        level_up: LevelUp,
    },
    ItemUsed {
        unit: UnitId,
        usage: ItemUse,
    },
    UnitWaited {
        unit: UnitId,
    },
    TurnPassed {
        from: SideId,
        to: SideId,
        turn: u32,
    },
    Victory {
        side: SideId,
    },
}

impl BattleEvent {
    /// Unit the event is about, if it concerns a single unit.
    pub fn unit(&self) -> Option<UnitId> {
        match self {
            BattleEvent::UnitSelected { unit, .. }
            | BattleEvent::SelectionCleared { unit }
            | BattleEvent::UnitMoved { unit, .. }
            | BattleEvent::MoveUndone { unit, .. }
            | BattleEvent::WeaponEquipped { unit, .. }
            | BattleEvent::WeaponOrderRestored { unit, .. }
            | BattleEvent::TargetChosen { unit, .. }
            | BattleEvent::UnitFell { unit, .. }
            | BattleEvent::ExperienceGained { unit, .. }
            | BattleEvent::LeveledUp { unit, .. }
            | BattleEvent::ItemUsed { unit, .. }
            | BattleEvent::UnitWaited { unit } => Some(*unit),
            BattleEvent::StrikeResolved(outcome) => Some(outcome.attacker),
            BattleEvent::TurnPassed { .. } | BattleEvent::Victory { .. } => None,
        }
    }
}
