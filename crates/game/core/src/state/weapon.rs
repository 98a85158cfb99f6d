//! Weapon definitions and the melee advantage triangle.

use super::RangeSet;

/// Weapon taxonomy.
///
/// The three melee kinds form a rock-paper-scissors triangle; ranged kinds sit
/// outside of it.
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
pub enum WeaponKind {
    Sword,
    Lance,
    Axe,
    Bow,
    Spell,
}

impl WeaponKind {
    /// The kind this one beats.
    pub const fn advantage(self) -> Option<WeaponKind> {
        match self {
            WeaponKind::Sword => Some(WeaponKind::Axe),
            WeaponKind::Lance => Some(WeaponKind::Sword),
            WeaponKind::Axe => Some(WeaponKind::Lance),
            WeaponKind::Bow | WeaponKind::Spell => None,
        }
    }

    /// The kind this one loses to.
    pub const fn weakness(self) -> Option<WeaponKind> {
        match self {
            WeaponKind::Sword => Some(WeaponKind::Lance),
            WeaponKind::Lance => Some(WeaponKind::Axe),
            WeaponKind::Axe => Some(WeaponKind::Sword),
            WeaponKind::Bow | WeaponKind::Spell => None,
        }
    }

    pub fn beats(self, other: WeaponKind) -> bool {
        self.advantage() == Some(other)
    }

    pub fn loses_to(self, other: WeaponKind) -> bool {
        self.weakness() == Some(other)
    }

    pub const fn is_melee(self) -> bool {
        matches!(self, WeaponKind::Sword | WeaponKind::Lance | WeaponKind::Axe)
    }
}

/// Immutable weapon stats.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Weapon {
    /// Display and record name (e.g. `Iron Sword`).
    pub name: String,
    /// Tier or school tag (`Iron`, `Steel`, `Fire`, ...).
    pub level: String,
    pub kind: WeaponKind,
    pub might: i32,
    pub weight: i32,
    pub range: RangeSet,
}

impl Weapon {
    pub fn new(
        name: impl Into<String>,
        kind: WeaponKind,
        might: i32,
        weight: i32,
        range: RangeSet,
    ) -> Self {
        Self {
            name: name.into(),
            level: String::new(),
            kind,
            might,
            weight,
            range,
        }
    }

    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    pub fn reaches(&self, distance: u32) -> bool {
        self.range.contains(distance)
    }
}
