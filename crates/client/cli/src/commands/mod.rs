mod play;
mod show;

pub use play::Play;
pub use show::Show;

use std::path::{Path, PathBuf};

use anyhow::Result;
use game_content::ConfigLoader;
use game_core::{GameConfig, SideId};

/// Options shared by every command that loads a level.
#[derive(clap::Args)]
pub struct LevelArgs {
    /// Content directory holding battlefields/, units/, weapons/, items/ and levels/
    #[arg(short, long, value_name = "DIR", default_value = "content")]
    pub content: PathBuf,

    /// Level to load (file name under levels/, without `.dat`)
    #[arg(short, long, value_name = "LEVEL")]
    pub level: String,

    /// Game configuration file (defaults to <content>/config.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Battle seed, overriding the configuration
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Player-controlled sides, overriding the configuration
    #[arg(long, value_name = "SIDE", value_delimiter = ',')]
    pub human_sides: Option<Vec<u8>>,
}

impl LevelArgs {
    pub fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => ConfigLoader::load_or_default(&self.content.join("config.toml"))?,
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(sides) = &self.human_sides {
            config.human_sides = sides.iter().copied().map(SideId).collect();
        }
        Ok(config)
    }

    pub fn content(&self) -> &Path {
        &self.content
    }
}
