use super::{SideId, UnitId};

/// Where the battle stands inside the current side's turn.
///
/// Each variant carries what the next step needs: the acting unit, the slot
/// its primary weapon was swapped from, and the chosen target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// No unit selected.
    #[default]
    Idle,
    UnitSelected { unit: UnitId },
    /// Move committed; action menu open.
    UnitMoved { unit: UnitId },
    WeaponMenu { unit: UnitId },
    /// Weapon chosen. `swapped_from` is the slot it was promoted from.
    Targeting { unit: UnitId, swapped_from: usize },
    /// Target chosen; forecast on display.
    ConfirmingStrike {
        unit: UnitId,
        swapped_from: usize,
        target: UnitId,
    },
    /// Primary strike resolved; counter pending.
    StrikeInProgress { unit: UnitId, target: UnitId },
    ItemMenu { unit: UnitId },
    /// A side has won. Nothing else can happen.
    Concluded { victor: SideId },
}

impl Phase {
    /// Unit driving the current phase, if any.
    pub fn acting_unit(&self) -> Option<UnitId> {
        match *self {
            Phase::Idle | Phase::Concluded { .. } => None,
            Phase::UnitSelected { unit }
            | Phase::UnitMoved { unit }
            | Phase::WeaponMenu { unit }
            | Phase::Targeting { unit, .. }
            | Phase::ConfirmingStrike { unit, .. }
            | Phase::StrikeInProgress { unit, .. }
            | Phase::ItemMenu { unit } => Some(unit),
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Phase::Idle)
    }

    pub fn is_concluded(&self) -> bool {
        matches!(self, Phase::Concluded { .. })
    }
}
