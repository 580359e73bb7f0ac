use crate::{ValidationError, MAX_ENTRY};
use std::num::IntErrorKind;

pub(crate) fn is_blank(raw: &str) -> bool {
    raw.trim().is_empty()
}

pub(crate) fn has_content(raw: &[String]) -> bool {
    raw.iter().any(|value| !is_blank(value))
}

/// Blank counts as zero; anything else must be a whole number within
/// [`MAX_ENTRY`] either way.
pub(crate) fn parse_score(player: usize, raw: &str) -> Result<i64, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let out_of_range = ValidationError::OutOfRange {
        player,
        limit: MAX_ENTRY,
    };
    match trimmed.parse::<i64>() {
        Ok(value) if (-MAX_ENTRY..=MAX_ENTRY).contains(&value) => Ok(value),
        Ok(_) => Err(out_of_range),
        Err(err) if matches!(err.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(out_of_range)
        }
        Err(_) => Err(ValidationError::NotANumber {
            player,
            raw: raw.to_string(),
        }),
    }
}

pub(crate) fn parse_scores(raw: &[String]) -> Result<Vec<i64>, ValidationError> {
    raw.iter()
        .enumerate()
        .map(|(player, value)| parse_score(player, value))
        .collect()
}

/// Bids and trick counts: like scores, but never below zero.
pub(crate) fn parse_counts(raw: &[String]) -> Result<Vec<i64>, ValidationError> {
    let values = parse_scores(raw)?;
    if let Some(player) = values.iter().position(|value| *value < 0) {
        return Err(ValidationError::Negative { player });
    }
    Ok(values)
}

pub(crate) fn parse_made(raw: &str) -> bool {
    raw.trim().eq_ignore_ascii_case("true")
}

/// Exactly one player at zero, the usual "someone went out" rule.
pub(crate) fn require_single_zero(values: &[i64]) -> Result<usize, ValidationError> {
    let mut zeros = values.iter().enumerate().filter(|(_, v)| **v == 0);
    match (zeros.next(), zeros.next()) {
        (None, _) => Err(ValidationError::NoWinner),
        (Some(_), Some(_)) => Err(ValidationError::MultipleWinners),
        (Some((idx, _)), None) => Ok(idx),
    }
}
