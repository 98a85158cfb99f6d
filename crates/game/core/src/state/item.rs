//! Consumable items and the stats they touch.

/// Stat adjusted by an item.
///
/// `Range` is the movement budget, not a weapon range.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum StatKind {
    #[strum(serialize = "HP")]
    Hp,
    Strength,
    Defense,
    Skill,
    Speed,
    Range,
}

impl StatKind {
    /// Stats that may grow on level up, in roll order.
    pub const GROWTH_ORDER: [StatKind; 5] = [
        StatKind::Hp,
        StatKind::Strength,
        StatKind::Defense,
        StatKind::Skill,
        StatKind::Speed,
    ];
}

/// An inventory item: potions, stat boosters and the like.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub name: String,
    pub stat: StatKind,
    /// Signed amount added to `stat` per use.
    pub bonus: i32,
    pub uses: u32,
    pub description: String,
}

impl Item {
    pub fn new(name: impl Into<String>, stat: StatKind, bonus: i32, uses: u32) -> Self {
        Self {
            name: name.into(),
            stat,
            bonus,
            uses,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_uses(mut self, uses: u32) -> Self {
        self.uses = uses;
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.uses == 0
    }
}
