//! Combat resolution system.
//!
//! Pure functions over [`Combatant`] views. Nothing here mutates a unit; the
//! engine applies the returned outcomes.
//!
//! - `hit_chance`: skill against weight and speed, then terrain and weapon-triangle modifiers
//! - `damage`: strength plus might against defense
//! - `experience_gain`: level gap plus weapon weight, with a kill bonus
//! - `resolve_strike`: one strike against a percentage roll

pub mod damage;
pub mod experience;
pub mod hit;
pub mod result;

pub use damage::damage;
pub use experience::{KILL_BONUS, MISS_EXPERIENCE, experience_gain};
pub use hit::{hit_chance, ranges_overlap};
pub use result::{CounterForecast, Forecast, StrikeOutcome, can_counter, forecast, resolve_strike};

use crate::env::{Field, TerrainKind};
use crate::state::{Location, Unit, Weapon};

/// A unit as seen by the combat formulas: itself, its primary weapon and the
/// terrain it stands on.
#[derive(Clone, Copy, Debug)]
pub struct Combatant<'a> {
    pub unit: &'a Unit,
    pub terrain: Option<TerrainKind>,
}

impl<'a> Combatant<'a> {
    /// Looks up the terrain under the unit's current location.
    pub fn on(field: &Field, unit: &'a Unit) -> Self {
        Self {
            unit,
            terrain: field.terrain_at(unit.location),
        }
    }

    pub fn weapon(&self) -> Option<&'a Weapon> {
        self.unit.primary_weapon()
    }

    pub fn location(&self) -> Location {
        self.unit.location
    }
}
