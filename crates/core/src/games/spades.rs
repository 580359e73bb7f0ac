use super::ScoringRules;
use crate::engine::input::{has_content, parse_counts};
use crate::engine::{GameBase, TargetRule};
use crate::scoring::{spades_individual, spades_team, SPADES_TRICKS};
use crate::{Phase, Player, RecordKind, RoundMeta, RoundRecord, StructuralError, ValidationError};

/// Partnership or cutthroat Spades with nil, blind nil and bags.
#[derive(Debug, Clone)]
pub(crate) struct Spades {
    /// Blind-nil calls staged for the bid being entered.
    pub(crate) blind_nil: Vec<bool>,
}

impl Spades {
    pub(crate) fn new(base: &mut GameBase) -> Self {
        base.phase = Phase::Bid;
        Self {
            blind_nil: vec![false; base.player_count()],
        }
    }

    fn staged_blind_nil(&self, count: usize) -> Vec<bool> {
        let mut flags = self.blind_nil.clone();
        flags.resize(count, false);
        flags
    }

    fn submit_bids(&mut self, base: &mut GameBase, raw: &[String]) -> Result<(), ValidationError> {
        let bids = parse_counts(raw)?;
        let blind_nil = self.staged_blind_nil(base.player_count());
        if let Some(player) = (0..bids.len()).find(|idx| blind_nil[*idx] && bids[*idx] != 0) {
            return Err(ValidationError::BlindNilNeedsZero { player });
        }
        let snapshot = base.snapshot();
        for ((player, bid), blind) in base.players.iter_mut().zip(&bids).zip(&blind_nil) {
            player.bid = *bid;
            player.is_blind_nil = *blind;
        }
        let dealer = base.rotating_dealer();
        base.history.push(RoundRecord {
            dealer_index: dealer,
            snapshot: Some(snapshot),
            meta: RoundMeta {
                raw: Some(raw.to_vec()),
                bid_raw: Some(raw.to_vec()),
                blind_nil,
                ..RoundMeta::default()
            },
            ..RoundRecord::bid(base.round, bids)
        });
        base.phase = Phase::Score;
        base.temp_input.clear();
        self.blind_nil = vec![false; base.player_count()];
        Ok(())
    }

    fn score_hand(base: &GameBase, tricks: &[i64]) -> (Vec<Player>, Vec<i64>) {
        let mut players = base.players.clone();
        if !base.settings.use_teams {
            let scores = players
                .iter_mut()
                .zip(tricks)
                .map(|(player, taken)| spades_individual(player, *taken))
                .collect();
            return (players, scores);
        }
        let mut scores = vec![0; players.len()];
        for team in 0..base.team_count() {
            let (first, second) = (team * 2, team * 2 + 1);
            let partner = players[second].clone();
            let score = spades_team(&mut players[first], &partner, (tricks[first], tricks[second]));
            scores[first] = score;
            scores[second] = score;
        }
        (players, scores)
    }

    fn submit_tricks(&mut self, base: &mut GameBase, raw: &[String]) -> Result<(), ValidationError> {
        if !has_content(raw) {
            return Err(ValidationError::NoTricks);
        }
        let tricks = parse_counts(raw)?;
        let counted: i64 = tricks.iter().sum();
        if counted != SPADES_TRICKS {
            return Err(ValidationError::TrickTotal {
                expected: SPADES_TRICKS,
                counted,
            });
        }

        let (mut players, scores) = Self::score_hand(base, &tricks);
        let totals = GameBase::checked_totals(&players, &scores)?;

        let locked = match base.history.last() {
            Some(record) if record.is_bid() => base.history.pop(),
            _ => None,
        };
        let pre_hand = base.snapshot();
        let (bid_raw, blind_nil, dealer, snapshot) = match locked {
            Some(record) => (
                record.meta.bid_raw,
                record.meta.blind_nil,
                record.dealer_index,
                record.snapshot,
            ),
            None => (None, Vec::new(), base.rotating_dealer(), None),
        };
        for (player, total) in players.iter_mut().zip(totals) {
            player.total = total;
        }
        let bids = base.players.iter().map(|player| player.bid).collect();
        base.players = players;
        base.history.push(RoundRecord {
            kind: RecordKind::Complete,
            bids,
            tricks,
            dealer_index: dealer,
            snapshot: Some(snapshot.unwrap_or(pre_hand)),
            meta: RoundMeta {
                raw: Some(raw.to_vec()),
                bid_raw,
                blind_nil,
                ..RoundMeta::default()
            },
            ..RoundRecord::scored(base.round, scores)
        });
        base.advance_round(TargetRule::Highest);
        base.phase = Phase::Bid;
        base.clear_pending();
        Ok(())
    }

    fn check_reopenable(base: &GameBase, record: &RoundRecord) -> Result<(), StructuralError> {
        let label = record.label;
        if record.meta.bid_raw.is_none() {
            return Err(StructuralError::MissingBidInputs { label });
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

impl ScoringRules for Spades {
    fn submit(
        &mut self,
        base: &mut GameBase,
        raw: &[String],
        _modifiers: &[Vec<String>],
    ) -> Result<(), ValidationError> {
        match base.phase {
            Phase::Bid => self.submit_bids(base, raw),
            Phase::Score => self.submit_tricks(base, raw),
        }
    }

    fn undo(&mut self, base: &mut GameBase) -> Result<Option<RoundRecord>, StructuralError> {
        if let Some(last) = base.history.last().filter(|record| record.is_complete()) {
            Self::check_reopenable(base, last)?;
        }
        let Some(last) = base.pop_round()? else {
            return Ok(None);
        };
        let count = base.player_count();
        let mut blind_nil = last.meta.blind_nil.clone();
        blind_nil.resize(count, false);
        match last.kind {
            RecordKind::Bid => {
                base.phase = Phase::Bid;
                self.blind_nil = blind_nil;
            }
            RecordKind::Complete => {
                for ((player, bid), blind) in base.players.iter_mut().zip(&last.bids).zip(&blind_nil) {
                    player.bid = *bid;
                    player.is_blind_nil = *blind;
                }
                let bid_raw = last.meta.bid_raw.clone();
                base.history.push(RoundRecord {
                    dealer_index: last.dealer_index,
                    snapshot: last.snapshot.clone(),
                    meta: RoundMeta {
                        raw: bid_raw.clone(),
                        bid_raw,
                        blind_nil: last.meta.blind_nil.clone(),
                        ..RoundMeta::default()
                    },
                    ..RoundRecord::bid(last.label, last.bids.clone())
                });
                base.phase = Phase::Score;
                self.blind_nil = vec![false; count];
            }
            RecordKind::Score => {}
        }
        Ok(Some(last))
    }

    fn hero(&self, base: &GameBase) -> String {
        match base.phase {
            Phase::Bid => "BID".to_string(),
            Phase::Score => "TRICKS".to_string(),
        }
    }
}
