use crate::games::{GameKind, Rules};
use crate::{
    EngineError, Event, EventBus, GameConfig, GameSettings, Phase, Player, RngState, RosterError,
    RoundRecord, StructuralError, Suit, ValidationError,
};
use tracing::{debug, info};

mod base;
pub(crate) mod input;

pub use base::GameBase;
pub(crate) use base::TargetRule;

use input::is_blank;

const MADE: &str = "true";
const MISSED: &str = "false";

/// One game in progress: the shared round lifecycle plus the rules of the
/// game being played.
#[derive(Debug, Clone)]
pub struct Engine {
    pub(crate) base: GameBase,
    pub(crate) rules: Rules,
}

impl Engine {
    /// Starts a fresh game. `seed` drives anything randomized at setup
    /// (Shanghai goal orders).
    pub fn new(
        config: GameConfig,
        players: Vec<Player>,
        settings: GameSettings,
        seed: u64,
    ) -> Result<Self, EngineError> {
        if players.is_empty() {
            return Err(StructuralError::EmptyRoster.into());
        }
        if settings.use_teams && players.len() % 2 != 0 {
            return Err(RosterError::OddTeamRoster {
                count: players.len(),
            }
            .into());
        }
        let kind = GameKind::from_key(&config.key);
        let mut base = GameBase::new(config, players, settings);
        let mut rng = RngState::from_seed(seed);
        let rules = Rules::build(kind, &mut base, &mut rng);
        info!(
            game = %base.config.key,
            players = base.player_count(),
            teams = settings.use_teams,
            "game started"
        );
        Ok(Self { base, rules })
    }

    pub fn kind(&self) -> GameKind {
        self.rules.kind()
    }

    pub fn config(&self) -> &GameConfig {
        &self.base.config
    }

    pub fn settings(&self) -> GameSettings {
        self.base.settings
    }

    pub fn players(&self) -> &[Player] {
        &self.base.players
    }

    pub fn round(&self) -> u32 {
        self.base.round
    }

    pub fn deal_count(&self) -> u32 {
        self.base.deal_count
    }

    pub fn phase(&self) -> Phase {
        self.base.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.base.is_game_over
    }

    pub fn history(&self) -> &[RoundRecord] {
        &self.base.history
    }

    pub fn modifiers(&self) -> &[Vec<String>] {
        &self.base.modifiers
    }

    pub fn stars(&self) -> &[bool] {
        &self.base.current_stars
    }

    pub fn temp_input(&self) -> &[String] {
        &self.base.temp_input
    }

    pub fn hand_size(&self) -> Option<u32> {
        match &self.rules {
            Rules::OldHell(rules) => Some(rules.hand_size),
            _ => None,
        }
    }

    pub fn current_trump(&self) -> Option<Suit> {
        match &self.rules {
            Rules::OldHell(rules) => rules.current_trump,
            _ => None,
        }
    }

    pub fn manual_starter(&self) -> Option<usize> {
        match &self.rules {
            Rules::MexicanTrain(rules) => rules.manual_starter,
            _ => None,
        }
    }

    pub fn random_map(&self) -> Option<&[Vec<String>]> {
        match &self.rules {
            Rules::Shanghai(rules) => rules.random_map.as_deref(),
            _ => None,
        }
    }

    pub fn blind_nil_flags(&self) -> Option<&[bool]> {
        match &self.rules {
            Rules::Spades(rules) => Some(&rules.blind_nil),
            _ => None,
        }
    }

    /// Dealer (or Mexican Train starter) for the hand being played.
    pub fn dealer_index(&self) -> Option<usize> {
        self.rules.get().dealer_index(&self.base)
    }

    /// Headline for the current round: contract, pass direction, phase banner.
    pub fn hero(&self) -> String {
        self.rules.get().hero(&self.base)
    }

    /// Column note for `round_idx` (zero-based), such as a player's
    /// randomized contract.
    pub fn round_description(&self, player: usize, round_idx: usize) -> Option<String> {
        self.rules.get().round_description(&self.base, player, round_idx)
    }

    /// Checks a submission without applying it.
    pub fn validate(&self, raw: &[String], modifiers: &[Vec<String>]) -> Result<(), ValidationError> {
        let mut trial = self.clone();
        let mut events = EventBus::default();
        trial.submit_round(raw, modifiers, &mut events)
    }

    /// Applies one round (or one bid phase) of raw per-player input. On error
    /// nothing changed.
    pub fn submit_round(
        &mut self,
        raw: &[String],
        modifiers: &[Vec<String>],
        events: &mut EventBus,
    ) -> Result<(), ValidationError> {
        if self.base.is_game_over {
            return Err(ValidationError::GameOver);
        }
        let expected = self.base.player_count();
        if raw.len() != expected {
            return Err(ValidationError::InputCount {
                expected,
                actual: raw.len(),
            });
        }
        if let Err(err) = self.rules.get_mut().submit(&mut self.base, raw, modifiers) {
            debug!(game = %self.base.config.key, round = self.base.round, error = %err, "submission rejected");
            return Err(err);
        }
        self.emit_committed(events);
        Ok(())
    }

    /// Submits whatever has been staged through the setters.
    pub fn submit_staged(&mut self, events: &mut EventBus) -> Result<(), ValidationError> {
        let raw = self.staged_inputs();
        let modifiers = self.base.modifiers.clone();
        self.submit_round(&raw, &modifiers, events)
    }

    /// Pending input, one entry per player.
    pub fn staged_inputs(&self) -> Vec<String> {
        let mut raw = self.base.temp_input.clone();
        raw.resize(self.base.player_count(), self.pending_filler().to_string());
        raw
    }

    fn pending_filler(&self) -> &'static str {
        match (&self.rules, self.base.phase) {
            (Rules::OldHell(_), Phase::Score) => MISSED,
            _ => "",
        }
    }

    fn emit_committed(&self, events: &mut EventBus) {
        let Some(last) = self.base.history.last() else {
            return;
        };
        if last.is_bid() {
            info!(game = %self.base.config.key, label = last.label, "bids locked");
            events.push(Event::BidsLocked {
                label: last.label,
                bids: last.bids.clone(),
            });
        } else {
            info!(game = %self.base.config.key, label = last.label, "round scored");
            events.push(Event::RoundScored {
                label: last.label,
                scores: last.scores.clone(),
                totals: self.base.players.iter().map(|p| p.total).collect(),
            });
        }
        if self.base.is_game_over {
            let winners = self.winners();
            info!(game = %self.base.config.key, ?winners, "game over");
            events.push(Event::GameOver { winners });
        }
    }

    /// Reverts the latest history record. `Ok(None)` when there is nothing to
    /// undo; on error the engine is untouched.
    pub fn undo(&mut self, events: &mut EventBus) -> Result<Option<RoundRecord>, StructuralError> {
        let popped = self.rules.get_mut().undo(&mut self.base)?;
        if let Some(record) = &popped {
            info!(game = %self.base.config.key, label = record.label, kind = ?record.kind, "round undone");
            events.push(Event::RoundUndone {
                label: record.label,
                kind: record.kind,
            });
        }
        Ok(popped)
    }

    fn check_index(&self, index: usize) -> Result<(), EngineError> {
        let len = self.base.player_count();
        if index >= len {
            return Err(EngineError::PlayerIndex { index, len });
        }
        Ok(())
    }

    fn unsupported(&self, action: &'static str) -> EngineError {
        EngineError::Unsupported {
            action,
            game: self.base.config.name.clone(),
        }
    }

    fn require_phase(&self, action: &'static str, phase: Phase) -> Result<(), EngineError> {
        if self.base.phase != phase {
            return Err(EngineError::WrongPhase {
                action,
                phase: self.base.phase,
            });
        }
        Ok(())
    }

    fn pending_slot(&mut self, index: usize) -> &mut String {
        let filler = self.pending_filler();
        let count = self.base.player_count();
        if self.base.temp_input.len() < count {
            self.base.temp_input.resize(count, filler.to_string());
        }
        &mut self.base.temp_input[index]
    }

    pub fn set_temp_input(&mut self, index: usize, value: impl Into<String>) -> Result<(), EngineError> {
        self.check_index(index)?;
        *self.pending_slot(index) = value.into();
        Ok(())
    }

    pub fn set_trump(&mut self, suit: Suit) -> Result<(), EngineError> {
        self.require_phase("trump selection", Phase::Bid)?;
        match &mut self.rules {
            Rules::OldHell(rules) => {
                rules.current_trump = Some(suit);
                Ok(())
            }
            _ => Err(self.unsupported("trump selection")),
        }
    }

    pub fn set_starter(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        match &mut self.rules {
            Rules::MexicanTrain(rules) => {
                rules.manual_starter = Some(index);
                Ok(())
            }
            _ => Err(self.unsupported("starter selection")),
        }
    }

    /// Flips a staged blind-nil call. The player's bid must be blank or zero
    /// and is set to zero.
    pub fn toggle_blind_nil(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        if !matches!(self.rules, Rules::Spades(_)) || !self.base.config.has_blind_nil {
            return Err(self.unsupported("blind nil"));
        }
        self.require_phase("blind nil", Phase::Bid)?;
        let turning_on = self.blind_nil_flags().and_then(|flags| flags.get(index)) != Some(&true);
        if turning_on {
            let slot = self.pending_slot(index);
            if !is_blank(slot) && slot.trim() != "0" {
                return Err(ValidationError::BlindNilNeedsZero { player: index }.into());
            }
            *slot = "0".to_string();
        }
        if let Rules::Spades(rules) = &mut self.rules {
            let count = self.base.players.len();
            rules.blind_nil.resize(count, false);
            rules.blind_nil[index] = turning_on;
        }
        Ok(())
    }

    pub fn toggle_star(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        if !self.base.config.has_stars {
            return Err(self.unsupported("stars"));
        }
        let count = self.base.player_count();
        self.base.current_stars.resize(count, false);
        self.base.current_stars[index] = !self.base.current_stars[index];
        Ok(())
    }

    /// Adds or removes a helper bonus for one player. Non-end helpers replace
    /// each other (a Qwirkle is either a Q or a QQ).
    pub fn toggle_modifier(&mut self, index: usize, id: &str) -> Result<(), EngineError> {
        self.check_index(index)?;
        let Some(helper) = self.base.config.helper(id) else {
            return Err(EngineError::UnknownHelper {
                game: self.base.config.name.clone(),
                id: id.to_string(),
            });
        };
        let exclusive = !helper.is_end;
        let count = self.base.player_count();
        self.base.modifiers.resize(count, Vec::new());
        let config = &self.base.config;
        let list = &mut self.base.modifiers[index];
        if let Some(pos) = list.iter().position(|existing| existing == id) {
            list.remove(pos);
            return Ok(());
        }
        if exclusive {
            list.retain(|existing| config.helper(existing).is_some_and(|other| other.is_end));
        }
        list.push(id.to_string());
        Ok(())
    }

    /// Flips an Old Hell player between made and missed.
    pub fn toggle_made(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        if !matches!(self.rules, Rules::OldHell(_)) {
            return Err(self.unsupported("made/missed"));
        }
        self.require_phase("made/missed", Phase::Score)?;
        let slot = self.pending_slot(index);
        let next = if slot.trim() == MADE { MISSED } else { MADE };
        *slot = next.to_string();
        Ok(())
    }

    /// Fills the Hearts inputs for a moon shot by `index`.
    pub fn apply_moon(&mut self, index: usize) -> Result<(), EngineError> {
        self.check_index(index)?;
        if !matches!(self.rules, Rules::Hearts(_)) {
            return Err(self.unsupported("moon"));
        }
        self.base.temp_input = (0..self.base.player_count())
            .map(|idx| if idx == index { "0" } else { "26" }.to_string())
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::test_support::{config, engine, players, raw, submit, totals};
    use crate::{HelperDef, ScoreKind};

    #[test]
    fn rejects_empty_and_odd_team_rosters() {
        let generic = GameConfig::generic("qwirkle");
        assert_eq!(
            Engine::new(generic.clone(), Vec::new(), GameSettings::default(), 1).err(),
            Some(EngineError::Structural(StructuralError::EmptyRoster))
        );
        let teams = GameSettings {
            use_teams: true,
            ..GameSettings::default()
        };
        assert_eq!(
            Engine::new(generic, players(3), teams, 1).err(),
            Some(EngineError::Roster(RosterError::OddTeamRoster { count: 3 }))
        );
    }

    #[test]
    fn wrong_input_count_is_rejected() {
        let mut game = engine(config("qwirkle", ScoreKind::HighScore), 3, GameSettings::default());
        assert_eq!(
            submit(&mut game, &["1", "2"]),
            Err(ValidationError::InputCount { expected: 3, actual: 2 })
        );
    }

    #[test]
    fn validate_does_not_mutate() {
        let game = engine(config("qwirkle", ScoreKind::HighScore), 2, GameSettings::default());
        assert!(game.validate(&raw(&["4", "5"]), &[]).is_ok());
        assert_eq!(game.validate(&raw(&["4", "x"]), &[]).err(), Some(ValidationError::NotANumber {
            player: 1,
            raw: "x".to_string()
        }));
        assert!(game.history().is_empty());
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn events_follow_submissions_and_undo() {
        let mut game = engine(config("qwirkle", ScoreKind::HighScore), 2, GameSettings::default());
        let mut bus = EventBus::default();
        game.submit_round(&raw(&["4", "5"]), &[], &mut bus).expect("round");
        game.undo(&mut bus).expect("undo");
        let events: Vec<_> = bus.drain().collect();
        assert_eq!(
            events,
            [
                Event::RoundScored {
                    label: 1,
                    scores: vec![4, 5],
                    totals: vec![4, 5]
                },
                Event::RoundUndone {
                    label: 1,
                    kind: crate::RecordKind::Score
                },
            ]
        );
        assert_eq!(game.temp_input(), raw(&["4", "5"]).as_slice());
        assert_eq!(totals(&game), [0, 0]);
    }

    #[test]
    fn undo_on_empty_history_is_a_no_op() {
        let mut game = engine(config("triominos", ScoreKind::LowScore), 2, GameSettings::default());
        let mut bus = EventBus::default();
        assert_eq!(game.undo(&mut bus), Ok(None));
        assert!(bus.is_empty());
    }

    #[test]
    fn setters_check_the_game() {
        let mut game = engine(config("qwirkle", ScoreKind::HighScore), 2, GameSettings::default());
        assert!(matches!(game.set_starter(0), Err(EngineError::Unsupported { .. })));
        assert!(matches!(game.toggle_star(0), Err(EngineError::Unsupported { .. })));
        assert!(matches!(game.toggle_modifier(0, "zz"), Err(EngineError::UnknownHelper { .. })));
        assert_eq!(game.set_temp_input(5, "1"), Err(EngineError::PlayerIndex { index: 5, len: 2 }));
        assert!(matches!(game.set_trump(Suit::Clubs), Err(EngineError::WrongPhase { .. })));
    }

    #[test]
    fn dealer_rotates_through_teams_first() {
        let mut shanghai = GameConfig {
            has_dealer: true,
            has_teams: true,
            ..config("shanghai", ScoreKind::LowScore)
        };
        shanghai.rounds = None;
        let teams = GameSettings {
            use_teams: true,
            ..GameSettings::default()
        };
        let mut game = engine(shanghai, 6, teams);
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(game.dealer_index().expect("dealer"));
            submit(&mut game, &["0", "0", "5", "5", "10", "10"]).expect("round");
        }
        assert_eq!(seen, [0, 2, 4, 1, 3, 5]);
    }

    #[test]
    fn moon_and_made_helpers_stage_inputs() {
        let hearts = GameConfig {
            helpers: vec![HelperDef {
                id: "moon".to_string(),
                label: "Moon".to_string(),
                value: 0,
                is_end: false,
                text: None,
            }],
            ..config("hearts", ScoreKind::LowScore)
        };
        let mut game = engine(hearts, 4, GameSettings::default());
        game.apply_moon(2).expect("moon");
        assert_eq!(game.staged_inputs(), raw(&["26", "26", "0", "26"]));
        game.submit_staged(&mut EventBus::default()).expect("moon round");
        assert_eq!(totals(&game), [26, 26, 0, 26]);

        let mut old_hell = engine(config("oldhell", ScoreKind::HighScore), 3, GameSettings::default());
        old_hell.set_trump(Suit::Spades).expect("trump");
        submit(&mut old_hell, &["1", "2", "3"]).expect("bids");
        old_hell.toggle_made(1).expect("made");
        assert_eq!(old_hell.staged_inputs(), raw(&["false", "true", "false"]));
        old_hell.submit_staged(&mut EventBus::default()).expect("score");
        assert_eq!(totals(&old_hell), [0, 12, 0]);
    }
}
