use super::input::{has_content, parse_scores};
use crate::{
    GameConfig, GameSettings, Phase, Player, RoundMeta, RoundRecord, StructuralError,
    ValidationError,
};

/// Which end of the standings is compared against the target score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TargetRule {
    Lowest,
    Highest,
    Ignore,
}

/// Round lifecycle shared by every game: counters, history, pending input
/// and the player roster.
#[derive(Debug, Clone)]
pub struct GameBase {
    pub(crate) config: GameConfig,
    pub(crate) settings: GameSettings,
    pub(crate) players: Vec<Player>,
    pub(crate) round: u32,
    pub(crate) deal_count: u32,
    pub(crate) phase: Phase,
    pub(crate) is_game_over: bool,
    pub(crate) history: Vec<RoundRecord>,
    pub(crate) modifiers: Vec<Vec<String>>,
    pub(crate) current_stars: Vec<bool>,
    pub(crate) temp_input: Vec<String>,
}

impl GameBase {
    pub(crate) fn new(config: GameConfig, players: Vec<Player>, settings: GameSettings) -> Self {
        let count = players.len();
        Self {
            config,
            settings,
            players,
            round: 1,
            deal_count: 0,
            phase: Phase::Score,
            is_game_over: false,
            history: Vec::new(),
            modifiers: vec![Vec::new(); count],
            current_stars: vec![false; count],
            temp_input: Vec::new(),
        }
    }

    pub(crate) fn player_count(&self) -> usize {
        self.players.len()
    }

    pub(crate) fn team_count(&self) -> usize {
        self.players.len() / 2
    }

    /// Dealer seat for the current deal. Teams rotate first, then members
    /// within a team.
    pub(crate) fn rotating_dealer(&self) -> Option<usize> {
        if !self.config.has_dealer || self.players.is_empty() {
            return None;
        }
        let deals = self.deal_count as usize;
        if self.settings.use_teams && self.team_count() > 0 {
            let teams = self.team_count();
            let team = deals % teams;
            let member = (deals / teams) % 2;
            return Some(team * 2 + member);
        }
        Some(deals % self.players.len())
    }

    pub(crate) fn validate_default(&self, raw: &[String]) -> Result<(), ValidationError> {
        parse_scores(raw)?;
        if !has_content(raw) {
            return Err(ValidationError::Empty);
        }
        Ok(())
    }

    pub(crate) fn snapshot(&self) -> Vec<Player> {
        self.players.clone()
    }

    /// Raw values plus the helper bonuses each player selected.
    pub(crate) fn with_modifiers(&self, inputs: &[i64], modifiers: &[Vec<String>]) -> Vec<i64> {
        inputs
            .iter()
            .enumerate()
            .map(|(idx, value)| {
                let bonus = modifiers
                    .get(idx)
                    .into_iter()
                    .flatten()
                    .filter_map(|id| self.config.helper(id))
                    .fold(0i64, |acc, helper| acc.saturating_add(helper.value));
                value.saturating_add(bonus)
            })
            .collect()
    }

    /// Totals after adding `scores`, or the first player whose total would
    /// leave the `i64` range.
    pub(crate) fn checked_totals(players: &[Player], scores: &[i64]) -> Result<Vec<i64>, ValidationError> {
        players
            .iter()
            .zip(scores)
            .enumerate()
            .map(|(player, (current, score))| {
                current
                    .total
                    .checked_add(*score)
                    .ok_or(ValidationError::TotalOverflow { player })
            })
            .collect()
    }

    /// Applies `scores` to the totals and appends the round to history.
    /// Nothing changes when a total would overflow.
    pub(crate) fn commit_scores(
        &mut self,
        scores: Vec<i64>,
        raw: &[String],
        modifiers: &[Vec<String>],
        dealer_index: Option<usize>,
    ) -> Result<(), ValidationError> {
        let totals = Self::checked_totals(&self.players, &scores)?;
        let snapshot = self.snapshot();
        for (player, total) in self.players.iter_mut().zip(totals) {
            player.total = total;
        }
        self.history.push(RoundRecord {
            dealer_index,
            meta: RoundMeta {
                raw: Some(raw.to_vec()),
                modifiers: modifiers.to_vec(),
                ..RoundMeta::default()
            },
            star_flags: self.current_stars.clone(),
            snapshot: Some(snapshot),
            ..RoundRecord::scored(self.round, scores)
        });
        Ok(())
    }

    pub(crate) fn bump_counters(&mut self) {
        self.deal_count += 1;
        self.round += 1;
    }

    pub(crate) fn check_target(&mut self, rule: TargetRule) {
        let target = self.settings.target_score;
        if target <= 0 {
            return;
        }
        let totals = self.players.iter().map(|p| p.total);
        let extreme = match rule {
            TargetRule::Lowest => totals.min(),
            TargetRule::Highest => totals.max(),
            TargetRule::Ignore => None,
        };
        if extreme.is_some_and(|value| value >= target) {
            self.is_game_over = true;
        }
    }

    pub(crate) fn check_round_limit(&mut self) {
        if let Some(limit) = self.config.round_limit() {
            if self.round > limit {
                self.is_game_over = true;
            }
        }
    }

    pub(crate) fn advance_round(&mut self, rule: TargetRule) {
        self.bump_counters();
        self.check_target(rule);
        self.check_round_limit();
    }

    pub(crate) fn clear_pending(&mut self) {
        let count = self.players.len();
        self.modifiers = vec![Vec::new(); count];
        self.current_stars = vec![false; count];
        self.temp_input.clear();
    }

    fn check_last_record(&self) -> Result<(), StructuralError> {
        let Some(last) = self.history.last() else {
            return Ok(());
        };
        if let Some(snapshot) = &last.snapshot {
            if snapshot.len() != self.players.len() {
                return Err(StructuralError::SnapshotSize {
                    label: last.label,
                    expected: self.players.len(),
                    actual: snapshot.len(),
                });
            }
        }
        Ok(())
    }

    /// Pops the latest record and rolls the shared state back to before it.
    /// Nothing changes when the record cannot be restored.
    pub(crate) fn pop_round(&mut self) -> Result<Option<RoundRecord>, StructuralError> {
        self.check_last_record()?;
        let Some(last) = self.history.pop() else {
            return Ok(None);
        };
        self.is_game_over = false;
        if last.kind.advances_round() {
            self.round = self.round.saturating_sub(1).max(1);
            self.deal_count = self.deal_count.saturating_sub(1);
        }
        match &last.snapshot {
            Some(snapshot) => self.players = snapshot.clone(),
            None => {
                for (player, score) in self.players.iter_mut().zip(&last.scores) {
                    player.total = player.total.saturating_sub(*score);
                }
            }
        }
        let count = self.players.len();
        if let Some(raw) = &last.meta.raw {
            self.temp_input = raw.clone();
        }
        self.modifiers = last.meta.modifiers.clone();
        self.modifiers.resize(count, Vec::new());
        self.current_stars = last.star_flags.clone();
        self.current_stars.resize(count, false);
        Ok(Some(last))
    }
}
