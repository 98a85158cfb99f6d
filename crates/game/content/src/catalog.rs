//! Named weapons and items that unit records refer to.

use std::collections::BTreeMap;

use game_core::{Item, Weapon};

use crate::error::RecordError;

/// In-memory lookup of weapon and item definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    weapons: BTreeMap<String, Weapon>,
    items: BTreeMap<String, Item>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a weapon under its own name, replacing any previous entry.
    pub fn insert_weapon(&mut self, weapon: Weapon) {
        self.weapons.insert(weapon.name.clone(), weapon);
    }

    /// Registers an item under `key`, usually its record's file name.
    pub fn insert_item(&mut self, key: impl Into<String>, item: Item) {
        self.items.insert(key.into(), item);
    }

    pub fn weapon(&self, name: &str) -> Result<&Weapon, RecordError> {
        self.weapons
            .get(name)
            .ok_or_else(|| RecordError::UnknownWeapon {
                name: name.to_owned(),
            })
    }

    /// Finds an item by key, falling back to the item's display name.
    pub fn item(&self, name: &str) -> Result<&Item, RecordError> {
        self.items
            .get(name)
            .or_else(|| self.items.values().find(|item| item.name == name))
            .ok_or_else(|| RecordError::UnknownItem {
                name: name.to_owned(),
            })
    }

    pub fn weapon_count(&self) -> usize {
        self.weapons.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
