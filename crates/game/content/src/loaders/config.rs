//! Game configuration loader.

use std::path::Path;

use anyhow::Context as _;
use game_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Failed to parse config {}", path.display()))
    }

    /// Load `path` when it exists, the default configuration otherwise.
    pub fn load_or_default(path: &Path) -> LoadResult<GameConfig> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            Ok(GameConfig::default())
        }
    }

    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content).context("Failed to parse config TOML")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use game_core::SideId;

    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = ConfigLoader::parse("seed = 42\nhuman_sides = [0, 2]\n").unwrap();
        assert_eq!(config.seed, 42);
        assert_eq!(config.human_sides, [SideId(0), SideId(2)]);
        assert_eq!(config.ai_reach_threshold, GameConfig::DEFAULT_AI_REACH_THRESHOLD);
        assert!(config.auto_end_turn);
    }

    #[test]
    fn unknown_types_are_rejected() {
        assert!(ConfigLoader::parse("seed = \"soon\"").is_err());
    }
}
