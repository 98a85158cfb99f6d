//! Directory-backed content loader.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use game_core::{
    BattleState, Controller, Field, GameConfig, Item, Side, SideId, Unit, UnitId, Weapon,
};

use crate::catalog::Catalog;
use crate::loaders::{LoadResult, read_file, write_file};
use crate::records::{
    LevelRecord, UnitRecord, parse_battlefield, parse_item, parse_level, parse_unit, parse_weapon,
    write_level, write_unit,
};

const EXTENSION: &str = "dat";

pub const BATTLEFIELDS: &str = "battlefields";
pub const UNITS: &str = "units";
pub const WEAPONS: &str = "weapons";
pub const ITEMS: &str = "items";
pub const LEVELS: &str = "levels";

/// Loads records from a content directory.
///
/// # Directory Structure
///
/// ```text
/// content/
/// ├── battlefields/plains.dat
/// ├── items/Vulnerary.dat
/// ├── levels/intro.dat
/// ├── units/
/// │   ├── Seth.dat
/// │   └── intro/Brigand_1.dat   (`*Brigand_1` in levels/intro.dat)
/// └── weapons/Iron Sword.dat
/// ```
#[derive(Clone, Debug)]
pub struct ContentLoader {
    root: PathBuf,
}

impl ContentLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the record `name` inside `dir`. `name` may contain `/`.
    pub fn record_path(&self, dir: &str, name: &str) -> PathBuf {
        self.root.join(dir).join(format!("{name}.{EXTENSION}"))
    }

    pub fn load_battlefield(&self, name: &str) -> LoadResult<Field> {
        let path = self.record_path(BATTLEFIELDS, name);
        let text = read_file(&path)?;
        parse_battlefield(&text).with_context(|| format!("Invalid battlefield {}", path.display()))
    }

    pub fn load_weapon(&self, name: &str) -> LoadResult<Weapon> {
        let path = self.record_path(WEAPONS, name);
        let text = read_file(&path)?;
        parse_weapon(name, &text).with_context(|| format!("Invalid weapon {}", path.display()))
    }

    pub fn load_item(&self, name: &str) -> LoadResult<Item> {
        let path = self.record_path(ITEMS, name);
        let text = read_file(&path)?;
        parse_item(&text).with_context(|| format!("Invalid item {}", path.display()))
    }

    /// Every weapon and item record, keyed by file name.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        let mut catalog = Catalog::new();
        for name in self.record_names(WEAPONS)? {
            catalog.insert_weapon(self.load_weapon(&name)?);
        }
        for name in self.record_names(ITEMS)? {
            let item = self.load_item(&name)?;
            catalog.insert_item(name, item);
        }
        tracing::debug!(
            weapons = catalog.weapon_count(),
            items = catalog.item_count(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn load_unit(&self, name: &str, catalog: &Catalog) -> LoadResult<UnitRecord> {
        let path = self.record_path(UNITS, name);
        let text = read_file(&path)?;
        let sheet = parse_unit(&text).with_context(|| format!("Invalid unit {}", path.display()))?;
        UnitRecord::resolve(name, sheet, catalog)
            .with_context(|| format!("Unresolved equipment in {}", path.display()))
    }

    pub fn load_level_record(&self, name: &str) -> LoadResult<LevelRecord> {
        let path = self.record_path(LEVELS, name);
        let text = read_file(&path)?;
        parse_level(&text).with_context(|| format!("Invalid level {}", path.display()))
    }

    /// Assembles the battle described by `levels/<name>.dat`.
    ///
    /// Units are numbered from 1 in roster order. Sides listed in
    /// `config.human_sides` are player controlled, the rest are AI.
    pub fn load_level(&self, name: &str, config: &GameConfig) -> LoadResult<BattleState> {
        let level = self.load_level_record(name)?;
        self.assemble(name, &level, config)
    }

    /// Builds a battle from an already parsed roster.
    pub fn assemble(
        &self,
        name: &str,
        level: &LevelRecord,
        config: &GameConfig,
    ) -> LoadResult<BattleState> {
        let field = self.load_battlefield(&level.battlefield)?;
        let catalog = self.load_catalog()?;

        let mut sides: Vec<Side> = (0..level.side_count())
            .map(|index| {
                let id = SideId(index as u8);
                let controller = if config.is_human(id) {
                    Controller::Human
                } else {
                    Controller::Ai
                };
                Side::new(id, controller)
            })
            .collect();

        for (index, placement) in level.placements.iter().enumerate() {
            let record_name = placement.record_name(name);
            let template = self
                .load_unit(&record_name, &catalog)
                .with_context(|| format!("Level {name} places unit {}", placement.unit))?;
            let unit = template.spawn(
                UnitId(index as u32 + 1),
                placement.side,
                placement.location,
            )?;
            sides[placement.side.index()].units.push(unit);
        }

        let state = BattleState::new(field, sides)
            .with_context(|| format!("Level {name} cannot be assembled"))?
            .with_seed(config.seed);
        tracing::info!(
            level = name,
            sides = state.sides.len(),
            units = level.placements.len(),
            "level loaded"
        );
        Ok(state)
    }

    /// Writes `unit` to `units/<name>.dat`.
    pub fn save_unit(&self, name: &str, unit: &Unit) -> LoadResult<PathBuf> {
        let path = self.record_path(UNITS, name);
        let text = write_unit(unit).with_context(|| format!("Failed to format unit {name}"))?;
        write_file(&path, &text)?;
        Ok(path)
    }

    /// Writes the roster of `state` to `levels/<name>.dat`.
    pub fn save_level(
        &self,
        name: &str,
        level: &LevelRecord,
        state: &BattleState,
    ) -> LoadResult<PathBuf> {
        let path = self.record_path(LEVELS, name);
        let text =
            write_level(level, state).with_context(|| format!("Failed to format level {name}"))?;
        write_file(&path, &text)?;
        Ok(path)
    }

    /// Record names found directly in `dir`, sorted. A missing directory is empty.
    fn record_names(&self, dir: &str) -> LoadResult<Vec<String>> {
        let dir = self.root.join(dir);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("Failed to list directory {}", dir.display()))?;
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to list directory {}", dir.display()))?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_paths_nest_local_units() {
        let loader = ContentLoader::new("/tmp/content");
        assert_eq!(
            loader.record_path(UNITS, "intro/Brigand_1"),
            Path::new("/tmp/content/units/intro/Brigand_1.dat")
        );
        assert_eq!(loader.root(), Path::new("/tmp/content"));
    }
}
