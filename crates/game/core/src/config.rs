use crate::state::SideId;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Minimum AI score for a target to be engaged at all.
    pub ai_reach_threshold: i64,
    /// Percent chance (out of 100) for each stat to grow on level up.
    pub level_up_chance: u32,
    /// End the acting side's turn once none of its units can act.
    pub auto_end_turn: bool,
    /// Sides driven by a player; every other side is AI controlled.
    pub human_sides: Vec<SideId>,
    /// Battle seed fed into every roll.
    pub seed: u64,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    pub const WEAPON_SLOTS: usize = 4;
    pub const ITEM_SLOTS: usize = 4;
    /// Experience needed for one level.
    pub const MAX_EXP: u32 = 100;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_AI_REACH_THRESHOLD: i64 = 1000;
    pub const DEFAULT_LEVEL_UP_CHANCE: u32 = 1;

    pub fn new() -> Self {
        Self {
            ai_reach_threshold: Self::DEFAULT_AI_REACH_THRESHOLD,
            level_up_chance: Self::DEFAULT_LEVEL_UP_CHANCE,
            auto_end_turn: true,
            human_sides: vec![SideId::FIRST],
            seed: 0,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_human_sides(mut self, sides: impl IntoIterator<Item = SideId>) -> Self {
        self.human_sides = sides.into_iter().collect();
        self
    }

    pub fn is_human(&self, side: SideId) -> bool {
        self.human_sides.contains(&side)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
