use super::{SideId, Unit};

/// Who issues the decisions for a side.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Controller {
    #[default]
    Human,
    Ai,
}

/// A faction: an ordered roster sharing turn order and victory condition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Side {
    pub id: SideId,
    pub controller: Controller,
    pub units: Vec<Unit>,
}

impl Side {
    pub fn new(id: SideId, controller: Controller) -> Self {
        Self {
            id,
            controller,
            units: Vec::new(),
        }
    }

    pub fn with_units(mut self, units: impl IntoIterator<Item = Unit>) -> Self {
        self.units.extend(units);
        self
    }

    pub fn is_ai(&self) -> bool {
        self.controller == Controller::Ai
    }

    pub fn has_survivors(&self) -> bool {
        self.units.iter().any(Unit::is_alive)
    }

    pub fn living(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.units.iter().filter(|unit| unit.is_alive())
    }

    /// True while some living unit has not acted this turn.
    pub fn has_ready_units(&self) -> bool {
        self.living().any(|unit| unit.enabled)
    }
}
