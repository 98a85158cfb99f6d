//! Auto-play a level and report the outcome.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use game_content::{ContentLoader, LevelRecord};
use game_core::{BattleState, Location, UnitId};
use runtime::{BattleSession, EventLog, RuntimeConfig, SessionOutcome};
use serde::Serialize;

use super::LevelArgs;

/// Auto-play a level
#[derive(Parser)]
pub struct Play {
    #[command(flatten)]
    level: LevelArgs,

    /// Stop after this many turns without a victor
    #[arg(short = 't', long, default_value_t = 50)]
    max_turns: u32,

    /// Pause after each unit acts, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 0)]
    ai_delay_ms: u64,

    /// Write every battle event to this file as JSON lines
    #[arg(long, value_name = "FILE")]
    events: Option<PathBuf>,

    /// Save surviving units and the final roster into this content directory
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per surviving unit
    Summary,
    /// Full JSON output
    Json,
}

#[derive(Serialize)]
struct Report<'a> {
    level: &'a str,
    seed: u64,
    victor: Option<u8>,
    turn: u32,
    survivors: Vec<Survivor<'a>>,
}

#[derive(Serialize)]
struct Survivor<'a> {
    id: u32,
    name: &'a str,
    side: u8,
    hp: i32,
    hp_max: i32,
    level: u32,
    exp: u32,
    location: Location,
}

impl Play {
    pub async fn execute(self) -> Result<()> {
        let game_config = self.level.game_config()?;
        let loader = ContentLoader::new(self.level.content());
        let name = self.level.level.as_str();
        let roster = loader.load_level_record(name)?;
        let state = loader.assemble(name, &roster, &game_config)?;
        let seed = state.seed;

        let runtime_config = RuntimeConfig::new(game_config)
            .with_ai_delay(Duration::from_millis(self.ai_delay_ms))
            .with_event_buffer_size(1024);
        let mut session = BattleSession::new(state, runtime_config);
        if let Some(path) = &self.events {
            let log = EventLog::create(path)
                .with_context(|| format!("Failed to create event log {}", path.display()))?;
            session = session.with_event_log(log);
        }

        let outcome = session.autoplay(self.max_turns).await?;
        session.flush()?;

        if let Some(dir) = &self.export {
            export(dir, name, &roster, session.state())?;
        }

        let report = report(name, seed, outcome, session.state());
        match self.format {
            OutputFormat::Summary => print_summary(&report),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        }
        Ok(())
    }
}

fn report<'a>(level: &'a str, seed: u64, outcome: SessionOutcome, state: &'a BattleState) -> Report<'a> {
    let survivors = state
        .units()
        .filter(|unit| unit.is_alive())
        .map(|unit| Survivor {
            id: unit.id.0,
            name: &unit.name,
            side: unit.side.0,
            hp: unit.hp(),
            hp_max: unit.hp_max(),
            level: unit.level(),
            exp: unit.exp(),
            location: unit.location,
        })
        .collect();

    Report {
        level,
        seed,
        victor: outcome.victor.map(|side| side.0),
        turn: outcome.turn,
        survivors,
    }
}

fn print_summary(report: &Report<'_>) {
    match report.victor {
        Some(side) => println!("{}: side {side} wins on turn {}", report.level, report.turn),
        None => println!("{}: no victor after {} turns", report.level, report.turn - 1),
    }
    for unit in &report.survivors {
        println!(
            "  [side {}] {:<12} HP {:>3}/{:<3} Lv {:>2} Exp {:>2} at ({}, {})",
            unit.side,
            unit.name,
            unit.hp,
            unit.hp_max,
            unit.level,
            unit.exp,
            unit.location.x,
            unit.location.y
        );
    }
}

/// Saves each surviving unit under its roster record name, then the roster.
fn export(dir: &Path, level: &str, roster: &LevelRecord, state: &BattleState) -> Result<()> {
    let target = ContentLoader::new(dir);
    for (index, placement) in roster.placements.iter().enumerate() {
        let Some(unit) = state.unit(UnitId(index as u32 + 1)) else {
            continue;
        };
        if unit.is_alive() {
            target.save_unit(&placement.record_name(level), unit)?;
        }
    }
    let path = target.save_level(level, roster, state)?;
    tracing::info!(path = %path.display(), "roster exported");
    Ok(())
}
