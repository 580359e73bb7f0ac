use super::ScoringRules;
use crate::engine::input::{parse_scores, require_single_zero};
use crate::engine::GameBase;
use crate::ValidationError;

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Triominos;

impl ScoringRules for Triominos {
    fn validate(&self, base: &GameBase, raw: &[String]) -> Result<(), ValidationError> {
        require_single_zero(&parse_scores(raw)?)?;
        base.validate_default(raw)
    }
}
