use game_core::{
    GameConfig, Item, Location, SideId, Unit, UnitId, UnitStats, Weapon, WeaponKind,
};

use super::{Record, is_dummy, parse_number};
use crate::catalog::Catalog;
use crate::error::RecordError;

/// An item slot of a unit record: the item's name and, optionally, the uses
/// it has left.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemRef {
    pub name: String,
    pub uses: Option<u32>,
}

/// A unit record as written, with equipment still referenced by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitSheet {
    pub stats: UnitStats,
    pub weapons: Vec<String>,
    pub items: Vec<ItemRef>,
    pub wieldable: Vec<WeaponKind>,
}

/// Reads a unit record.
///
/// `HP` sets the maximum and the starting HP alike. `DUMMY` slots, zero-use
/// items and missing slot lines all leave the slot empty. `Exp` must stay
/// below [`GameConfig::MAX_EXP`].
pub fn parse_unit(text: &str) -> Result<UnitSheet, RecordError> {
    let record = Record::parse(text);
    let exp: u32 = record.number("Exp")?;
    if exp >= GameConfig::MAX_EXP {
        return Err(RecordError::OutOfRange {
            field: "Exp".to_owned(),
            value: exp,
            limit: GameConfig::MAX_EXP,
        });
    }
    let stats = UnitStats {
        level: record.number("Level")?,
        exp,
        hp_max: record.number("HP")?,
        strength: record.number("Strength")?,
        defense: record.number("Defense")?,
        skill: record.number("Skill")?,
        speed: record.number("Speed")?,
        movement: record.number("Movement Range")?,
    };

    let weapons = (1..=GameConfig::WEAPON_SLOTS)
        .filter_map(|slot| record.get(&format!("Weapon{slot}")))
        .filter(|name| !name.is_empty() && !is_dummy(name))
        .map(str::to_owned)
        .collect();

    let mut items = Vec::new();
    for slot in 1..=GameConfig::ITEM_SLOTS {
        let label = format!("Item{slot}");
        let Some(value) = record.get(&label) else {
            continue;
        };
        let item = item_ref(&label, value)?;
        if is_dummy(&item.name) || item.name.is_empty() || item.uses == Some(0) {
            continue;
        }
        items.push(item);
    }

    let wieldable = record
        .get("Wieldable")
        .unwrap_or_default()
        .split_whitespace()
        .map(|kind| {
            kind.parse().map_err(|_| RecordError::UnknownWeaponKind {
                value: kind.to_owned(),
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(UnitSheet {
        stats,
        weapons,
        items,
        wieldable,
    })
}

/// `Vulnerary 3` names an item with three uses left; `Vulnerary` keeps the
/// item's own count.
fn item_ref(label: &str, value: &str) -> Result<ItemRef, RecordError> {
    match value.rsplit_once(char::is_whitespace) {
        Some((name, uses)) if uses.chars().all(|c| c.is_ascii_digit()) => Ok(ItemRef {
            name: name.trim().to_owned(),
            uses: Some(parse_number(label, uses)?),
        }),
        _ => Ok(ItemRef {
            name: value.to_owned(),
            uses: None,
        }),
    }
}

/// The display name of a unit record: the file stem up to the first `_`,
/// without any directory part.
pub fn display_name(record_name: &str) -> &str {
    let stem = record_name.rsplit('/').next().unwrap_or(record_name);
    stem.split('_').next().unwrap_or(stem)
}

/// A unit template with its equipment resolved, ready to be placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitRecord {
    pub name: String,
    pub stats: UnitStats,
    pub weapons: Vec<Weapon>,
    pub items: Vec<Item>,
    pub wieldable: Vec<WeaponKind>,
}

impl UnitRecord {
    /// Looks up every referenced weapon and item in `catalog`.
    pub fn resolve(
        record_name: &str,
        sheet: UnitSheet,
        catalog: &Catalog,
    ) -> Result<Self, RecordError> {
        let weapons = sheet
            .weapons
            .iter()
            .map(|name| catalog.weapon(name).cloned())
            .collect::<Result<_, _>>()?;
        let items = sheet
            .items
            .iter()
            .map(|entry| {
                let item = catalog.item(&entry.name)?.clone();
                Ok(match entry.uses {
                    Some(uses) => item.with_uses(uses),
                    None => item,
                })
            })
            .collect::<Result<_, RecordError>>()?;

        Ok(Self {
            name: display_name(record_name).to_owned(),
            stats: sheet.stats,
            weapons,
            items,
            wieldable: sheet.wieldable,
        })
    }

    /// Creates a unit from this template.
    pub fn spawn(&self, id: UnitId, side: SideId, location: Location) -> Result<Unit, RecordError> {
        let mut unit = Unit::new(id, self.name.clone(), side, location, self.stats)
            .with_wieldable(self.wieldable.iter().copied());
        for weapon in &self.weapons {
            unit = unit
                .with_weapon(weapon.clone())
                .map_err(|weapon| RecordError::SlotsFull { name: weapon.name })?;
        }
        for item in &self.items {
            unit = unit
                .with_item(item.clone())
                .map_err(|item| RecordError::SlotsFull { name: item.name })?;
        }
        Ok(unit)
    }
}

#[cfg(test)]
mod tests {
    use game_core::{RangeSet, StatKind};

    use super::*;

    const EIRIKA: &str = "\
Level: 3
Exp: 42
HP: 18
Strength: 5
Defense: 3
Skill: 7
Speed: 8
Movement Range: 5
Weapon1: Rapier
Weapon2: DUMMY
Weapon3: DUMMY
Weapon4: DUMMY
Item1: Vulnerary 2
Item2: Elixir 0
Item3: DUMMY
Item4: DUMMY
Wieldable: Sword Lance
";

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.insert_weapon(Weapon::new("Rapier", WeaponKind::Sword, 7, 5, RangeSet::melee()));
        catalog.insert_item("Vulnerary", Item::new("Vulnerary", StatKind::Hp, 10, 3));
        catalog
    }

    #[test]
    fn sheet_skips_empty_slots() {
        let sheet = parse_unit(EIRIKA).unwrap();
        assert_eq!(sheet.stats.level, 3);
        assert_eq!(sheet.stats.movement, 5);
        assert_eq!(sheet.weapons, ["Rapier"]);
        assert_eq!(
            sheet.items,
            [ItemRef {
                name: "Vulnerary".into(),
                uses: Some(2)
            }]
        );
        assert_eq!(sheet.wieldable, [WeaponKind::Sword, WeaponKind::Lance]);
    }

    #[test]
    fn resolved_unit_spawns_with_its_equipment() {
        let record = UnitRecord::resolve("Eirika_lord", parse_unit(EIRIKA).unwrap(), &catalog())
            .unwrap();
        assert_eq!(record.name, "Eirika");
        assert_eq!(record.items[0].uses, 2);

        let unit = record
            .spawn(UnitId(7), SideId(0), Location::new(1, 2))
            .unwrap();
        assert_eq!(unit.exp(), 42);
        assert_eq!(unit.hp(), 18);
        assert_eq!(unit.primary_weapon().map(|w| w.name.as_str()), Some("Rapier"));
        assert!(unit.can_wield(WeaponKind::Lance));
    }

    #[test]
    fn full_experience_bar_is_rejected() {
        assert_eq!(
            parse_unit(&EIRIKA.replace("Exp: 42", "Exp: 142")),
            Err(RecordError::OutOfRange {
                field: "Exp".into(),
                value: 142,
                limit: 100
            })
        );
        assert!(parse_unit(&EIRIKA.replace("Exp: 42", "Exp: 100")).is_err());
        assert_eq!(
            parse_unit(&EIRIKA.replace("Exp: 42", "Exp: 99")).unwrap().stats.exp,
            99
        );
    }

    #[test]
    fn unknown_equipment_fails_resolution() {
        let sheet = parse_unit(&EIRIKA.replace("Rapier", "Excalibur")).unwrap();
        assert_eq!(
            UnitRecord::resolve("Eirika", sheet, &catalog()),
            Err(RecordError::UnknownWeapon {
                name: "Excalibur".into()
            })
        );
    }

    #[test]
    fn display_name_drops_directories_and_suffixes() {
        assert_eq!(display_name("chapter1/Brigand_2"), "Brigand");
        assert_eq!(display_name("Seth"), "Seth");
    }
}
