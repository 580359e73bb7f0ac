use crate::games::Rules;
use crate::{
    Engine, EngineError, GameCatalog, GameConfig, GameSettings, Phase, Player, RoundRecord,
    StructuralError, Suit,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Saved or broadcast game: which game plus its full state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameRecord {
    pub game_key: String,
    pub state: EngineRecord,
}

/// Engine state in a form that survives JSON. Fields that do not apply to
/// the game are `null`; fields missing on import keep the fresh-game value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineRecord {
    pub players: Vec<Player>,
    #[serde(default)]
    pub history: Vec<RoundRecord>,
    #[serde(default = "first_round")]
    pub round: u32,
    #[serde(default)]
    pub deal_count: u32,
    #[serde(default)]
    pub is_game_over: bool,
    #[serde(default)]
    pub random_map: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub phase: Option<Phase>,
    #[serde(default)]
    pub hand_size: Option<u32>,
    #[serde(default)]
    pub current_trump: Option<Suit>,
    #[serde(default)]
    pub manual_starter: Option<usize>,
    #[serde(default)]
    pub settings: GameSettings,
}

fn first_round() -> u32 {
    1
}

impl Engine {
    pub fn export(&self) -> GameRecord {
        GameRecord {
            game_key: self.config().key.clone(),
            state: EngineRecord {
                players: self.players().to_vec(),
                history: self.history().to_vec(),
                round: self.round(),
                deal_count: self.deal_count(),
                is_game_over: self.is_game_over(),
                random_map: self.random_map().map(<[Vec<String>]>::to_vec),
                phase: Some(self.phase()),
                hand_size: self.hand_size(),
                current_trump: self.current_trump(),
                manual_starter: self.manual_starter(),
                settings: self.settings(),
            },
        }
    }

    /// Rebuilds a game from a record, using `config` for its rules.
    pub fn import(record: &GameRecord, config: GameConfig) -> Result<Self, EngineError> {
        let state = &record.state;
        if state.players.is_empty() {
            return Err(StructuralError::EmptyRoster.into());
        }
        let mut engine = Engine::new(config, state.players.clone(), state.settings, 0)?;
        let base = &mut engine.base;
        base.history = state.history.clone();
        base.round = state.round.max(1);
        base.deal_count = state.deal_count;
        base.is_game_over = state.is_game_over;
        if let Some(phase) = state.phase {
            base.phase = phase;
        }
        match &mut engine.rules {
            Rules::Shanghai(rules) => {
                if let Some(map) = &state.random_map {
                    rules.random_map = Some(map.clone());
                }
            }
            Rules::OldHell(rules) => {
                if let Some(hand_size) = state.hand_size {
                    rules.hand_size = hand_size;
                }
                rules.current_trump = state.current_trump;
            }
            Rules::MexicanTrain(rules) => rules.manual_starter = state.manual_starter,
            _ => {}
        }
        debug!(
            game = %record.game_key,
            rounds = state.history.len(),
            "game imported"
        );
        Ok(engine)
    }

    /// Like [`Engine::import`], looking the rules up by the record's key.
    /// Unknown keys get generic scoring.
    pub fn import_from_catalog(record: &GameRecord, catalog: &GameCatalog) -> Result<Self, EngineError> {
        Self::import(record, catalog.config_or_generic(&record.game_key))
    }
}
