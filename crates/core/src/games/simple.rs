use super::ScoringRules;

/// Raw scores plus helper bonuses. Used for Qwirkle and any game without
/// rules of its own.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct SimpleScore;

impl ScoringRules for SimpleScore {}
