use crate::GameConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Bid,
    #[default]
    Score,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub bags: i64,
    #[serde(default)]
    pub bid: i64,
    #[serde(default)]
    pub is_blind_nil: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            total: 0,
            bags: 0,
            bid: 0,
            is_blind_nil: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameSettings {
    #[serde(default)]
    pub use_teams: bool,
    #[serde(default)]
    pub randomize: bool,
    #[serde(default)]
    pub target_score: i64,
}

impl GameSettings {
    /// Settings as chosen at setup, dropping options the game does not offer
    /// and falling back to the game's default target when none was given.
    pub fn resolve(config: &GameConfig, use_teams: bool, randomize: bool, target: Option<i64>) -> Self {
        let target_score = target
            .filter(|value| *value > 0)
            .or(config.target)
            .unwrap_or(0);
        Self {
            use_teams: use_teams && config.has_teams,
            randomize: randomize && config.has_randomize,
            target_score,
        }
    }
}
