use anyhow::Result;
use clap::Parser;
use game_content::ContentLoader;
use game_core::{BattleState, Location};

use super::LevelArgs;

/// Print a level's battlefield and roster
#[derive(Parser)]
pub struct Show {
    #[command(flatten)]
    level: LevelArgs,
}

impl Show {
    pub fn execute(self) -> Result<()> {
        let config = self.level.game_config()?;
        let state = ContentLoader::new(self.level.content()).load_level(&self.level.level, &config)?;

        print_field(&state);
        println!();
        print_roster(&state);
        Ok(())
    }
}

/// Terrain symbols, with the owning side's digit on occupied tiles.
fn print_field(state: &BattleState) {
    for (y, row) in state.field.rows().enumerate() {
        let line: String = row
            .iter()
            .enumerate()
            .map(|(x, terrain)| {
                let at = Location::new(x as i32, y as i32);
                match state.field.occupant_side(at) {
                    Some(side) => char::from_digit(u32::from(side.0) % 10, 10).unwrap_or('?'),
                    None => terrain.symbol(),
                }
            })
            .collect();
        println!("{line}");
    }
}

fn print_roster(state: &BattleState) {
    for side in &state.sides {
        println!("side {} ({})", side.id.0, side.controller);
        for unit in &side.units {
            let weapons: Vec<&str> = unit.weapons().iter().map(|weapon| weapon.name.as_str()).collect();
            println!(
                "  {:<4} {:<12} HP {:>3}/{:<3} Lv {:>2} at ({}, {})  {}",
                unit.id.to_string(),
                unit.name,
                unit.hp(),
                unit.hp_max(),
                unit.level(),
                unit.location.x,
                unit.location.y,
                weapons.join(", ")
            );
        }
    }
}
