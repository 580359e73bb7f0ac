use super::ScoringRules;
use crate::engine::input::{parse_scores, require_single_zero};
use crate::engine::{GameBase, TargetRule};
use crate::{RoundRecord, StructuralError, ValidationError};

pub(crate) const HIGHEST_DOUBLE: u32 = 13;

/// Double played as the engine for a round (12-12 first, down to 0-0).
pub(crate) fn engine_double(round: u32) -> u32 {
    HIGHEST_DOUBLE.saturating_sub(round)
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MexicanTrain {
    pub(crate) manual_starter: Option<usize>,
}

impl MexicanTrain {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl ScoringRules for MexicanTrain {
    fn validate(&self, base: &GameBase, raw: &[String]) -> Result<(), ValidationError> {
        base.validate_default(raw)?;
        if self.manual_starter.is_none() {
            return Err(ValidationError::StarterNotChosen);
        }
        require_single_zero(&parse_scores(raw)?).map(|_| ())
    }

    fn target_rule(&self, _base: &GameBase) -> TargetRule {
        TargetRule::Ignore
    }

    fn advance(&mut self, base: &mut GameBase) {
        base.advance_round(TargetRule::Ignore);
        self.manual_starter = None;
    }

    fn undo(&mut self, base: &mut GameBase) -> Result<Option<RoundRecord>, StructuralError> {
        let last = base.pop_round()?;
        if let Some(record) = &last {
            self.manual_starter = record.dealer_index;
        }
        Ok(last)
    }

    fn dealer_index(&self, _base: &GameBase) -> Option<usize> {
        self.manual_starter
    }

    fn hero(&self, base: &GameBase) -> String {
        let double = engine_double(base.round);
        format!("Double {double}")
    }

    fn round_description(&self, _base: &GameBase, _player: usize, round_idx: usize) -> Option<String> {
        let round = round_idx as u32 + 1;
        (round <= HIGHEST_DOUBLE).then(|| format!("{0}|{0}", engine_double(round)))
    }
}
