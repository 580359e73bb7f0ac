use super::ScoringRules;
use crate::engine::input::{parse_scores, require_single_zero};
use crate::engine::GameBase;
use crate::scoring::rummikub_round;
use crate::ValidationError;

/// Winner-takes-pot: the player who went out collects every other rack.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Rummikub;

impl ScoringRules for Rummikub {
    fn validate(&self, base: &GameBase, raw: &[String]) -> Result<(), ValidationError> {
        require_single_zero(&parse_scores(raw)?)?;
        base.validate_default(raw)
    }

    fn score(&self, _base: &GameBase, inputs: &[i64], _modifiers: &[Vec<String>]) -> Vec<i64> {
        rummikub_round(inputs)
    }
}
