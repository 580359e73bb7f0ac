use super::ScoringRules;
use crate::engine::input::{parse_counts, parse_made};
use crate::engine::{GameBase, TargetRule};
use crate::scoring::old_hell_score;
use crate::{
    Phase, RecordKind, RoundMeta, RoundRecord, StructuralError, Suit, ValidationError,
};

pub(crate) const DECK_SIZE: u32 = 52;

/// Bid-then-score game where the hand shrinks by one card every deal.
#[derive(Debug, Clone)]
pub(crate) struct OldHell {
    pub(crate) hand_size: u32,
    pub(crate) current_trump: Option<Suit>,
}

impl OldHell {
    pub(crate) fn new(base: &mut GameBase) -> Self {
        base.phase = Phase::Bid;
        let deck = base.config.deck_size.unwrap_or(DECK_SIZE);
        let players = base.player_count().max(1) as u32;
        Self {
            hand_size: deck / players,
            current_trump: None,
        }
    }

    fn submit_bids(&mut self, base: &mut GameBase, raw: &[String]) -> Result<(), ValidationError> {
        let trump = self.current_trump.ok_or(ValidationError::TrumpNotChosen)?;
        let bids = parse_counts(raw)?;
        let total: i64 = bids.iter().sum();
        if total == i64::from(self.hand_size) {
            return Err(ValidationError::ScrewTheDealer {
                total,
                hand_size: self.hand_size,
            });
        }
        let snapshot = base.snapshot();
        for (player, bid) in base.players.iter_mut().zip(&bids) {
            player.bid = *bid;
        }
        let dealer = base.rotating_dealer();
        base.history.push(RoundRecord {
            dealer_index: dealer,
            trump: Some(trump),
            snapshot: Some(snapshot),
            meta: RoundMeta {
                raw: Some(raw.to_vec()),
                bid_raw: Some(raw.to_vec()),
                ..RoundMeta::default()
            },
            ..RoundRecord::bid(self.hand_size, bids)
        });
        base.phase = Phase::Score;
        base.temp_input.clear();
        Ok(())
    }

    fn submit_outcome(&mut self, base: &mut GameBase, raw: &[String]) -> Result<(), ValidationError> {
        let made: Vec<bool> = raw.iter().map(|value| parse_made(value)).collect();
        let bids: Vec<i64> = base.players.iter().map(|player| player.bid).collect();
        let total = bids.iter().fold(0i64, |acc, bid| acc.saturating_add(*bid));
        if made.iter().all(|flag| *flag) && total != i64::from(self.hand_size) {
            return Err(ValidationError::ImpossibleOutcome);
        }
        let scores: Vec<i64> = bids
            .iter()
            .zip(&made)
            .map(|(bid, made)| old_hell_score(*bid, *made))
            .collect();
        let totals = GameBase::checked_totals(&base.players, &scores)?;

        let locked = match base.history.last() {
            Some(record) if record.is_bid() => base.history.pop(),
            _ => None,
        };
        let (snapshot, bid_raw, dealer, trump) = match locked {
            Some(record) => (record.snapshot, record.meta.bid_raw, record.dealer_index, record.trump),
            None => (None, None, base.rotating_dealer(), self.current_trump),
        };
        let pre_hand = base.snapshot();
        for (player, total) in base.players.iter_mut().zip(totals) {
            player.total = total;
        }
        base.history.push(RoundRecord {
            kind: RecordKind::Complete,
            bids,
            made,
            dealer_index: dealer,
            trump,
            snapshot: Some(snapshot.unwrap_or(pre_hand)),
            meta: RoundMeta {
                raw: Some(raw.to_vec()),
                bid_raw,
                ..RoundMeta::default()
            },
            ..RoundRecord::scored(self.hand_size, scores)
        });

        base.advance_round(TargetRule::Highest);
        self.hand_size = self.hand_size.saturating_sub(1);
        if self.hand_size < 1 {
            base.is_game_over = true;
        }
        self.current_trump = None;
        base.phase = Phase::Bid;
        base.clear_pending();
        Ok(())
    }

    /// A completed hand can only be reopened if its bids were kept.
    fn check_reopenable(base: &GameBase, record: &RoundRecord) -> Result<(), StructuralError> {
        let label = record.label;
        if record.meta.bid_raw.is_none() {
            return Err(StructuralError::MissingBidInputs { label });
        }
        if record.trump.is_none() {
            return Err(StructuralError::MissingTrump { label });
        }
        if record.bids.len() != base.player_count() {
            return Err(StructuralError::BidCount {
                label,
                expected: base.player_count(),
                actual: record.bids.len(),
            });
        }
        Ok(())
    }
}

impl ScoringRules for OldHell {
    fn submit(
        &mut self,
        base: &mut GameBase,
        raw: &[String],
        _modifiers: &[Vec<String>],
    ) -> Result<(), ValidationError> {
        match base.phase {
            Phase::Bid => self.submit_bids(base, raw),
            Phase::Score => self.submit_outcome(base, raw),
        }
    }

    fn undo(&mut self, base: &mut GameBase) -> Result<Option<RoundRecord>, StructuralError> {
        if let Some(last) = base.history.last().filter(|record| record.is_complete()) {
            Self::check_reopenable(base, last)?;
        }
        let Some(last) = base.pop_round()? else {
            return Ok(None);
        };
        match last.kind {
            RecordKind::Bid => {
                base.phase = Phase::Bid;
                self.current_trump = last.trump;
            }
            RecordKind::Complete => {
                for (player, bid) in base.players.iter_mut().zip(&last.bids) {
                    player.bid = *bid;
                }
                let bid_raw = last.meta.bid_raw.clone();
                base.history.push(RoundRecord {
                    dealer_index: last.dealer_index,
                    trump: last.trump,
                    snapshot: last.snapshot.clone(),
                    meta: RoundMeta {
                        raw: bid_raw.clone(),
                        bid_raw,
                        ..RoundMeta::default()
                    },
                    ..RoundRecord::bid(last.label, last.bids.clone())
                });
                base.phase = Phase::Score;
                self.hand_size += 1;
                self.current_trump = last.trump;
            }
            RecordKind::Score => {}
        }
        Ok(Some(last))
    }

    fn hero(&self, base: &GameBase) -> String {
        let banner = match base.phase {
            Phase::Bid => "BID",
            Phase::Score => "SCORE",
        };
        format!("{banner}\n{} Cards", self.hand_size)
    }
}
