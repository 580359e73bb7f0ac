use crate::{Player, Suit};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Single-phase round.
    #[default]
    Score,
    /// Locked bids of a two-phase hand, waiting for the score phase.
    Bid,
    /// Bids plus outcome of a two-phase hand.
    Complete,
}

impl RecordKind {
    /// Whether committing this record moved the round/deal counters.
    pub fn advances_round(self) -> bool {
        !matches!(self, RecordKind::Bid)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundMeta {
    #[serde(default)]
    pub raw: Option<Vec<String>>,
    #[serde(default)]
    pub modifiers: Vec<Vec<String>>,
    #[serde(default)]
    pub bid_raw: Option<Vec<String>>,
    #[serde(default)]
    pub blind_nil: Vec<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundRecord {
    /// Round number, or the hand size for Old Hell.
    pub label: u32,
    #[serde(default)]
    pub kind: RecordKind,
    #[serde(default)]
    pub scores: Vec<i64>,
    #[serde(default)]
    pub bids: Vec<i64>,
    #[serde(default)]
    pub made: Vec<bool>,
    #[serde(default)]
    pub tricks: Vec<i64>,
    #[serde(default)]
    pub dealer_index: Option<usize>,
    #[serde(default)]
    pub meta: RoundMeta,
    #[serde(default)]
    pub star_flags: Vec<bool>,
    /// Players as they were before this record was applied.
    #[serde(default)]
    pub snapshot: Option<Vec<Player>>,
    #[serde(default)]
    pub trump: Option<Suit>,
}

impl RoundRecord {
    pub fn scored(label: u32, scores: Vec<i64>) -> Self {
        Self {
            label,
            kind: RecordKind::Score,
            scores,
            bids: Vec::new(),
            made: Vec::new(),
            tricks: Vec::new(),
            dealer_index: None,
            meta: RoundMeta::default(),
            star_flags: Vec::new(),
            snapshot: None,
            trump: None,
        }
    }

    pub fn bid(label: u32, bids: Vec<i64>) -> Self {
        Self {
            kind: RecordKind::Bid,
            bids,
            ..Self::scored(label, Vec::new())
        }
    }

    pub fn is_bid(&self) -> bool {
        self.kind == RecordKind::Bid
    }

    pub fn is_complete(&self) -> bool {
        self.kind == RecordKind::Complete
    }

    /// What a score table shows in this record's row, one cell per player.
    /// Bid rows show the calls ("BN" for blind nil, "Nil" for a Spades zero).
    pub fn cells(&self, nil_names: bool) -> Vec<String> {
        if !self.is_bid() {
            return self.scores.iter().map(i64::to_string).collect();
        }
        self.bids
            .iter()
            .enumerate()
            .map(|(idx, bid)| {
                if self.meta.blind_nil.get(idx).copied().unwrap_or(false) {
                    "BN".to_string()
                } else if nil_names && *bid == 0 {
                    "Nil".to_string()
                } else {
                    bid.to_string()
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_cells_name_nil_calls() {
        let mut record = RoundRecord::bid(3, vec![0, 4, 0]);
        record.meta.blind_nil = vec![false, false, true];
        assert_eq!(record.cells(true), ["Nil", "4", "BN"]);
        assert_eq!(record.cells(false), ["0", "4", "BN"]);
    }

    #[test]
    fn legacy_record_defaults_missing_fields() {
        let record: RoundRecord = serde_json::from_str(r#"{"label":2,"scores":[5,0]}"#).expect("record");
        assert_eq!(record.kind, RecordKind::Score);
        assert!(record.snapshot.is_none());
        assert!(record.kind.advances_round());
        assert_eq!(record.cells(false), ["5", "0"]);
    }
}
