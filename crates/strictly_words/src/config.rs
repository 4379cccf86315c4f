//! Game rule settings.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Tunable rules for one game.
///
/// Every field has a default, so an empty TOML table is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GameConfig {
    /// Objectives shared by every player.
    #[serde(default = "default_public_objectives")]
    public_objectives: usize,

    /// Objectives dealt to each player privately.
    #[serde(default = "default_private_objectives")]
    private_objectives_per_player: usize,

    /// Passes in a row that end the game.
    #[serde(default = "default_max_consecutive_passes")]
    max_consecutive_passes: u32,

    /// Whether objectives are dealt at all.
    #[serde(default = "default_objectives_enabled")]
    objectives_enabled: bool,
}

fn default_public_objectives() -> usize {
    2
}

fn default_private_objectives() -> usize {
    1
}

fn default_max_consecutive_passes() -> u32 {
    6
}

fn default_objectives_enabled() -> bool {
    true
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            public_objectives: default_public_objectives(),
            private_objectives_per_player: default_private_objectives(),
            max_consecutive_passes: default_max_consecutive_passes(),
            objectives_enabled: default_objectives_enabled(),
        }
    }
}

impl GameConfig {
    /// Same rules without objectives.
    pub fn without_objectives(mut self) -> Self {
        self.objectives_enabled = false;
        self
    }

    /// Same rules with a different pass limit.
    pub fn with_max_consecutive_passes(mut self, passes: u32) -> Self {
        self.max_consecutive_passes = passes;
        self
    }
}
