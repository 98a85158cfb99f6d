//! Record writers. Output reads back through the matching parser.

use std::fmt::{self, Write as _};

use game_core::{BattleState, Field, GameConfig, Unit, UnitId};

use super::{DUMMY, LevelRecord};

/// Serializes a unit's current values as a unit record.
///
/// `HP` holds the current HP, which the reader takes as the maximum too: a
/// wounded unit comes back with a lowered maximum. Empty slots are written
/// as `DUMMY`.
pub fn write_unit(unit: &Unit) -> Result<String, fmt::Error> {
    let stats = &unit.stats;
    let mut out = String::new();
    writeln!(out, "Level: {}", unit.level())?;
    writeln!(out, "Exp: {}", unit.exp())?;
    writeln!(out, "HP: {}", unit.hp())?;
    writeln!(out, "Strength: {}", stats.strength)?;
    writeln!(out, "Defense: {}", stats.defense)?;
    writeln!(out, "Skill: {}", stats.skill)?;
    writeln!(out, "Speed: {}", stats.speed)?;
    writeln!(out, "Movement Range: {}", stats.movement)?;

    for slot in 0..GameConfig::WEAPON_SLOTS {
        let name = unit.weapons().get(slot).map_or(DUMMY, |weapon| weapon.name.as_str());
        writeln!(out, "Weapon{}: {name}", slot + 1)?;
    }
    for slot in 0..GameConfig::ITEM_SLOTS {
        match unit.items().get(slot) {
            Some(item) => writeln!(out, "Item{}: {} {}", slot + 1, item.name, item.uses)?,
            None => writeln!(out, "Item{}: {DUMMY}", slot + 1)?,
        }
    }

    let wieldable: Vec<String> = unit.wieldable().map(|kind| kind.to_string()).collect();
    writeln!(out, "Wieldable: {}", wieldable.join(" "))?;
    Ok(out)
}

/// Serializes a level roster with every surviving unit at its current tile.
///
/// Units are matched to `level.placements` by id: the n-th placement is
/// unit `n + 1`, the numbering the loader assigns.
pub fn write_level(level: &LevelRecord, state: &BattleState) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Battlefield: {}", level.battlefield)?;
    for (index, placement) in level.placements.iter().enumerate() {
        let Some(unit) = state.unit(UnitId(index as u32 + 1)) else {
            continue;
        };
        if !unit.is_alive() {
            continue;
        }
        let marker = if placement.local { "*" } else { "" };
        writeln!(
            out,
            "{} {marker}{} {} {}",
            placement.side.0, placement.unit, unit.location.x, unit.location.y
        )?;
    }
    Ok(out)
}

/// Serializes a battlefield as a dimension line and rows of symbols.
pub fn write_battlefield(field: &Field) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{} {}", field.width(), field.height())?;
    for row in field.rows() {
        let symbols: Vec<String> = row.iter().map(|kind| kind.symbol().to_string()).collect();
        writeln!(out, "{}", symbols.join(" "))?;
    }
    Ok(out)
}
