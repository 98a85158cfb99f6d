use std::time::Duration;

use game_core::GameConfig;

/// Settings of a [`BattleSession`](crate::BattleSession).
#[derive(Clone, Debug)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Pause after each AI unit acts. Zero disables pacing.
    pub ai_delay: Duration,
    /// Capacity of each event bus topic.
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub fn new(game_config: GameConfig) -> Self {
        Self {
            game_config,
            ..Self::default()
        }
    }

    pub fn with_ai_delay(mut self, delay: Duration) -> Self {
        self.ai_delay = delay;
        self
    }

    pub fn with_event_buffer_size(mut self, size: usize) -> Self {
        self.event_buffer_size = size;
        self
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            ai_delay: Duration::ZERO,
            event_buffer_size: 100,
        }
    }
}
