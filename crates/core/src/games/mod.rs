//! Per-game rules layered on the shared round lifecycle.

mod hearts;
mod mexican_train;
mod old_hell;
mod rummikub;
mod shanghai;
mod simple;
mod spades;
mod triominos;

use crate::engine::input::parse_scores;
use crate::engine::{GameBase, TargetRule};
use crate::{RngState, RoundRecord, ScoreKind, StructuralError, ValidationError};
use serde::{Deserialize, Serialize};

pub(crate) use hearts::Hearts;
pub(crate) use mexican_train::MexicanTrain;
pub(crate) use old_hell::OldHell;
pub(crate) use rummikub::Rummikub;
pub(crate) use shanghai::Shanghai;
pub(crate) use simple::SimpleScore;
pub(crate) use spades::Spades;
pub(crate) use triominos::Triominos;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum GameKind {
    Shanghai,
    MexicanTrain,
    OldHell,
    Spades,
    Hearts,
    Rummikub,
    Triominos,
    /// Plain per-round scores plus helper bonuses (Qwirkle and unknown games).
    Simple,
}

impl GameKind {
    pub fn from_key(key: &str) -> Self {
        match key {
            "shanghai" => GameKind::Shanghai,
            "mexicantrain" => GameKind::MexicanTrain,
            "oldhell" => GameKind::OldHell,
            "spades" => GameKind::Spades,
            "hearts" => GameKind::Hearts,
            "rummikub" => GameKind::Rummikub,
            "triominos" => GameKind::Triominos,
            _ => GameKind::Simple,
        }
    }

    pub fn is_two_phase(self) -> bool {
        matches!(self, GameKind::OldHell | GameKind::Spades)
    }
}

/// Hooks a game overrides; the defaults are the shared lifecycle.
pub(crate) trait ScoringRules {
    fn validate(&self, base: &GameBase, raw: &[String]) -> Result<(), ValidationError> {
        base.validate_default(raw)
    }

    fn score(&self, base: &GameBase, inputs: &[i64], modifiers: &[Vec<String>]) -> Vec<i64> {
        base.with_modifiers(inputs, modifiers)
    }

    fn submit(
        &mut self,
        base: &mut GameBase,
        raw: &[String],
        modifiers: &[Vec<String>],
    ) -> Result<(), ValidationError> {
        self.validate(base, raw)?;
        let inputs = parse_scores(raw)?;
        let scores = self.score(base, &inputs, modifiers);
        let dealer = self.dealer_index(base);
        base.commit_scores(scores, raw, modifiers, dealer)?;
        self.advance(base);
        base.clear_pending();
        Ok(())
    }

    fn target_rule(&self, base: &GameBase) -> TargetRule {
        match base.config.kind {
            ScoreKind::LowScore => TargetRule::Lowest,
            ScoreKind::HighScore | ScoreKind::TargetScore => TargetRule::Highest,
        }
    }

    fn advance(&mut self, base: &mut GameBase) {
        let rule = self.target_rule(base);
        base.advance_round(rule);
    }

    fn undo(&mut self, base: &mut GameBase) -> Result<Option<RoundRecord>, StructuralError> {
        base.pop_round()
    }

    fn dealer_index(&self, base: &GameBase) -> Option<usize> {
        base.rotating_dealer()
    }

    fn hero(&self, base: &GameBase) -> String {
        format!("{}\nRound {}", base.config.name, base.round)
    }

    fn round_description(&self, _base: &GameBase, _player: usize, _round_idx: usize) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Rules {
    Shanghai(Shanghai),
    MexicanTrain(MexicanTrain),
    OldHell(OldHell),
    Spades(Spades),
    Hearts(Hearts),
    Rummikub(Rummikub),
    Triominos(Triominos),
    Simple(SimpleScore),
}

impl Rules {
    /// Builds the rules for `kind` and puts `base` into that game's start
    /// state (e.g. the bid phase for two-phase games).
    pub(crate) fn build(kind: GameKind, base: &mut GameBase, rng: &mut RngState) -> Self {
        match kind {
            GameKind::Shanghai => Rules::Shanghai(Shanghai::new(base, rng)),
            GameKind::MexicanTrain => Rules::MexicanTrain(MexicanTrain::new()),
            GameKind::OldHell => Rules::OldHell(OldHell::new(base)),
            GameKind::Spades => Rules::Spades(Spades::new(base)),
            GameKind::Hearts => Rules::Hearts(Hearts),
            GameKind::Rummikub => Rules::Rummikub(Rummikub),
            GameKind::Triominos => Rules::Triominos(Triominos),
            GameKind::Simple => Rules::Simple(SimpleScore),
        }
    }

    pub(crate) fn kind(&self) -> GameKind {
        match self {
            Rules::Shanghai(_) => GameKind::Shanghai,
            Rules::MexicanTrain(_) => GameKind::MexicanTrain,
            Rules::OldHell(_) => GameKind::OldHell,
            Rules::Spades(_) => GameKind::Spades,
            Rules::Hearts(_) => GameKind::Hearts,
            Rules::Rummikub(_) => GameKind::Rummikub,
            Rules::Triominos(_) => GameKind::Triominos,
            Rules::Simple(_) => GameKind::Simple,
        }
    }

    pub(crate) fn get(&self) -> &dyn ScoringRules {
        match self {
            Rules::Shanghai(rules) => rules,
            Rules::MexicanTrain(rules) => rules,
            Rules::OldHell(rules) => rules,
            Rules::Spades(rules) => rules,
            Rules::Hearts(rules) => rules,
            Rules::Rummikub(rules) => rules,
            Rules::Triominos(rules) => rules,
            Rules::Simple(rules) => rules,
        }
    }

    pub(crate) fn get_mut(&mut self) -> &mut dyn ScoringRules {
        match self {
            Rules::Shanghai(rules) => rules,
            Rules::MexicanTrain(rules) => rules,
            Rules::OldHell(rules) => rules,
            Rules::Spades(rules) => rules,
            Rules::Hearts(rules) => rules,
            Rules::Rummikub(rules) => rules,
            Rules::Triominos(rules) => rules,
            Rules::Simple(rules) => rules,
        }
    }
}
