//! Units and their mutable per-battle values.

use std::collections::BTreeSet;

use arrayvec::ArrayVec;

use super::{InventoryError, Item, Location, RangeSet, SideId, StatKind, UnitId, Weapon, WeaponKind};
use crate::config::GameConfig;

/// Whether a unit is still in play.
///
/// Fallen units stay in their side's roster for bookkeeping but are never
/// selected, targeted or counted as occupants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitStatus {
    #[default]
    Active,
    Fallen,
}

/// Base values as they appear in a unit record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub level: u32,
    pub exp: u32,
    pub hp_max: i32,
    pub strength: i32,
    pub defense: i32,
    pub skill: i32,
    pub speed: i32,
    /// Movement budget spent on terrain costs each turn.
    pub movement: i32,
}

/// Stats raised by a single level up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelUp {
    pub level: u32,
    pub grown: Vec<StatKind>,
}

/// Result of consuming one use of an item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemUse {
    pub name: String,
    pub stat: StatKind,
    pub bonus: i32,
    pub uses_left: u32,
    /// The item ran out and its slot was compacted away.
    pub consumed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub side: SideId,
    pub location: Location,
    /// Tile the unit occupied before its last committed move.
    pub previous_location: Location,
    pub stats: UnitStats,
    hp: i32,
    status: UnitStatus,
    /// Still allowed to act during the current side's turn.
    pub enabled: bool,
    weapons: ArrayVec<Weapon, { GameConfig::WEAPON_SLOTS }>,
    items: ArrayVec<Item, { GameConfig::ITEM_SLOTS }>,
    wieldable: BTreeSet<WeaponKind>,
}

impl Unit {
    /// Creates a unit at full health with empty inventories.
    pub fn new(
        id: UnitId,
        name: impl Into<String>,
        side: SideId,
        location: Location,
        stats: UnitStats,
    ) -> Self {
        let hp = stats.hp_max.max(0);
        Self {
            id,
            name: name.into(),
            side,
            location,
            previous_location: location,
            stats: UnitStats {
                exp: stats.exp % GameConfig::MAX_EXP,
                ..stats
            },
            hp,
            status: if hp > 0 {
                UnitStatus::Active
            } else {
                UnitStatus::Fallen
            },
            enabled: true,
            weapons: ArrayVec::new(),
            items: ArrayVec::new(),
            wieldable: BTreeSet::new(),
        }
    }

    /// Adds a weapon to the first free slot. Returns the weapon back when full.
    pub fn with_weapon(mut self, weapon: Weapon) -> Result<Self, Weapon> {
        self.weapons.try_push(weapon).map_err(|err| err.element())?;
        Ok(self)
    }

    /// Adds an item to the first free slot. Returns the item back when full.
    pub fn with_item(mut self, item: Item) -> Result<Self, Item> {
        self.items.try_push(item).map_err(|err| err.element())?;
        Ok(self)
    }

    pub fn with_wieldable(mut self, kinds: impl IntoIterator<Item = WeaponKind>) -> Self {
        self.wieldable.extend(kinds);
        self
    }

    /// Overrides the current HP (clamped to `[0, hp_max]`), e.g. when restoring a wounded unit.
    pub fn with_hp(mut self, hp: i32) -> Self {
        self.set_hp(hp);
        self
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.status == UnitStatus::Active
    }

    pub fn status(&self) -> UnitStatus {
        self.status
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn hp_max(&self) -> i32 {
        self.stats.hp_max
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn exp(&self) -> u32 {
        self.stats.exp
    }

    /// Movement budget with negative modifiers floored at zero.
    pub fn movement_budget(&self) -> u32 {
        self.stats.movement.max(0) as u32
    }

    /// Weapon in slot 0, if any.
    pub fn primary_weapon(&self) -> Option<&Weapon> {
        self.weapons.first()
    }

    pub fn primary_range(&self) -> Option<&RangeSet> {
        self.primary_weapon().map(|weapon| &weapon.range)
    }

    /// Filled weapon slots in slot order. Absent slots are not represented.
    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn wieldable(&self) -> impl Iterator<Item = WeaponKind> + '_ {
        self.wieldable.iter().copied()
    }

    pub fn can_wield(&self, kind: WeaponKind) -> bool {
        self.wieldable.contains(&kind)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Moves the unit, remembering where it came from.
    pub fn commit_move(&mut self, destination: Location) {
        self.previous_location = self.location;
        self.location = destination;
    }

    /// Returns the unit to the tile it held before [`commit_move`](Self::commit_move).
    pub fn undo_move(&mut self) {
        self.location = self.previous_location;
    }

    /// Makes the weapon in `slot` primary; the weapons before it shift down by one.
    pub fn equip(&mut self, slot: usize) -> Result<(), InventoryError> {
        let weapon = self
            .weapons
            .get(slot)
            .ok_or_else(|| InventoryError::weapon_slot(slot, self.weapons.len()))?;
        if !self.can_wield(weapon.kind) {
            return Err(InventoryError::NotWieldable { kind: weapon.kind });
        }

        let weapon = self.weapons.remove(slot);
        self.weapons.insert(0, weapon);
        Ok(())
    }

    /// Inverse of [`equip`](Self::equip): sends the primary weapon back to `slot`.
    pub fn unequip_to(&mut self, slot: usize) {
        if slot == 0 || slot >= self.weapons.len() {
            return;
        }
        let weapon = self.weapons.remove(0);
        self.weapons.insert(slot, weapon);
    }

    /// Applies one use of the item in `slot`, removing it once exhausted.
    pub fn use_item(&mut self, slot: usize) -> Result<ItemUse, InventoryError> {
        let filled = self.items.len();
        let item = self
            .items
            .get_mut(slot)
            .ok_or_else(|| InventoryError::item_slot(slot, filled))?;
        if item.is_exhausted() {
            return Err(InventoryError::Exhausted {
                name: item.name.clone(),
            });
        }

        item.uses -= 1;
        let (stat, bonus) = (item.stat, item.bonus);
        let mut outcome = ItemUse {
            name: item.name.clone(),
            stat,
            bonus,
            uses_left: item.uses,
            consumed: item.uses == 0,
        };
        if outcome.consumed {
            self.items.remove(slot);
        }

        match stat {
            // Healing never kills; a negative HP item leaves at least 1 HP.
            StatKind::Hp => {
                let ceiling = self.stats.hp_max.max(self.hp);
                let healed = self.hp.saturating_add(bonus).clamp(1.min(self.hp), ceiling);
                outcome.bonus = healed - self.hp;
                self.hp = healed;
            }
            StatKind::Strength => self.stats.strength = self.stats.strength.saturating_add(bonus),
            StatKind::Defense => self.stats.defense = self.stats.defense.saturating_add(bonus),
            StatKind::Skill => self.stats.skill = self.stats.skill.saturating_add(bonus),
            StatKind::Speed => self.stats.speed = self.stats.speed.saturating_add(bonus),
            StatKind::Range => self.stats.movement = self.stats.movement.saturating_add(bonus),
        }
        Ok(outcome)
    }

    /// Subtracts damage and flips the status once HP reaches zero.
    ///
    /// Returns `true` only on the strike that fells the unit.
    pub fn apply_damage(&mut self, damage: u32) -> bool {
        if !self.is_alive() {
            return false;
        }
        let damage = i32::try_from(damage).unwrap_or(i32::MAX);
        self.set_hp(self.hp.saturating_sub(damage));
        !self.is_alive()
    }

    fn set_hp(&mut self, hp: i32) {
        self.hp = hp.clamp(0, self.stats.hp_max.max(0));
        if self.hp == 0 {
            self.status = UnitStatus::Fallen;
        }
    }

    /// Adds experience and performs every level up it crosses.
    ///
    /// Each level up rolls once per growth stat; a stat grows when its roll
    /// (in `[0, 100)`) is below `chance`. Negative totals clamp to zero.
    pub fn gain_experience(
        &mut self,
        amount: i32,
        chance: u32,
        mut roll: impl FnMut(StatKind) -> u32,
    ) -> Vec<LevelUp> {
        let total = (i64::from(self.stats.exp) + i64::from(amount)).max(0) as u64;
        let max_exp = u64::from(GameConfig::MAX_EXP);
        let crossings = total / max_exp;
        self.stats.exp = (total % max_exp) as u32;

        let mut level_ups = Vec::new();
        for _ in 0..crossings {
            self.stats.level = self.stats.level.saturating_add(1);
            let mut grown = Vec::new();
            for stat in StatKind::GROWTH_ORDER {
                if roll(stat) < chance {
                    self.grow(stat);
                    grown.push(stat);
                }
            }
            level_ups.push(LevelUp {
                level: self.stats.level,
                grown,
            });
        }
        level_ups
    }

    fn grow(&mut self, stat: StatKind) {
        match stat {
            StatKind::Hp => {
                self.stats.hp_max = self.stats.hp_max.saturating_add(1);
                self.hp = self.hp.saturating_add(1).min(self.stats.hp_max);
            }
            StatKind::Strength => self.stats.strength = self.stats.strength.saturating_add(1),
            StatKind::Defense => self.stats.defense = self.stats.defense.saturating_add(1),
            StatKind::Skill => self.stats.skill = self.stats.skill.saturating_add(1),
            StatKind::Speed => self.stats.speed = self.stats.speed.saturating_add(1),
            StatKind::Range => self.stats.movement = self.stats.movement.saturating_add(1),
        }
    }
}
