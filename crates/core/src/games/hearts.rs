use super::ScoringRules;
use crate::engine::input::{has_content, parse_scores};
use crate::engine::{GameBase, TargetRule};
use crate::scoring::{hearts_round, HEARTS_POINTS};
use crate::ValidationError;

/// Pass direction rotation for a table of `players`.
pub(crate) fn pass_sequence(players: usize) -> &'static [&'static str] {
    match players {
        3 => &["Left", "Right", "Hold"],
        5 => &["Left", "Right", "2 Left", "2 Right", "Hold"],
        6 => &["Left", "Right", "2 Left", "2 Right", "3 Left", "3 Right"],
        _ => &["Left", "Right", "Across", "Hold"],
    }
}

fn pass_for(players: usize, round_idx: usize) -> &'static str {
    let sequence = pass_sequence(players);
    sequence[round_idx % sequence.len()]
}

#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Hearts;

impl ScoringRules for Hearts {
    fn validate(&self, base: &GameBase, raw: &[String]) -> Result<(), ValidationError> {
        if !has_content(raw) {
            return Err(ValidationError::Empty);
        }
        let sum: i64 = parse_scores(raw)?.iter().sum();
        let moon = HEARTS_POINTS * (base.player_count() as i64 - 1);
        if sum != HEARTS_POINTS && sum != moon {
            return Err(ValidationError::HeartsTotal { moon, actual: sum });
        }
        Ok(())
    }

    fn score(&self, base: &GameBase, inputs: &[i64], modifiers: &[Vec<String>]) -> Vec<i64> {
        base.with_modifiers(&hearts_round(inputs), modifiers)
    }

    /// The game ends once anyone reaches the target, even though the lowest
    /// total wins.
    fn target_rule(&self, _base: &GameBase) -> TargetRule {
        TargetRule::Highest
    }

    fn hero(&self, base: &GameBase) -> String {
        let round_idx = base.round as usize - 1;
        format!("Pass {}", pass_for(base.player_count(), round_idx))
    }

    fn round_description(&self, base: &GameBase, _player: usize, round_idx: usize) -> Option<String> {
        Some(pass_for(base.player_count(), round_idx).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::test_support::{engine, submit, totals};
    use crate::{GameConfig, GameSettings, ScoreKind};

    fn hearts() -> GameConfig {
        GameConfig {
            name: "Hearts".to_string(),
            kind: ScoreKind::LowScore,
            target: Some(100),
            rounds: None,
            has_dealer: true,
            min_players: Some(3),
            max_players: Some(6),
            ..GameConfig::generic("hearts")
        }
    }

    fn settings() -> GameSettings {
        GameSettings::resolve(&hearts(), false, false, None)
    }

    #[test]
    fn total_must_be_26_or_moon() {
        let mut game = engine(hearts(), 4, settings());
        assert_eq!(submit(&mut game, &["", "", "", ""]), Err(ValidationError::Empty));
        assert_eq!(
            submit(&mut game, &["10", "10", "0", "0"]),
            Err(ValidationError::HeartsTotal { moon: 78, actual: 20 })
        );
        submit(&mut game, &["10", "10", "6", "0"]).expect("normal hand");
        assert_eq!(totals(&game), [10, 10, 6, 0]);
    }

    #[test]
    fn single_26_is_a_moon_shot() {
        let mut game = engine(hearts(), 4, settings());
        submit(&mut game, &["0", "26", "0", "0"]).expect("moon");
        assert_eq!(totals(&game), [26, 0, 26, 26]);
        submit(&mut game, &["26", "0", "26", "26"]).expect("moon entered directly");
        assert_eq!(totals(&game), [52, 0, 52, 52]);
    }

    #[test]
    fn game_ends_when_someone_reaches_target() {
        let mut game = engine(hearts(), 4, settings());
        for _ in 0..4 {
            submit(&mut game, &["20", "6", "0", "0"]).expect("hand");
        }
        assert!(!game.is_game_over());
        submit(&mut game, &["20", "6", "0", "0"]).expect("hand");
        assert_eq!(totals(&game), [100, 30, 0, 0]);
        assert!(game.is_game_over());
    }

    #[test]
    fn pass_direction_rotates_by_table_size() {
        let game = engine(hearts(), 4, settings());
        assert_eq!(game.hero(), "Pass Left");
        assert_eq!(game.round_description(0, 2), Some("Across".to_string()));
        assert_eq!(pass_for(3, 2), "Hold");
        assert_eq!(pass_for(6, 5), "3 Right");
        assert_eq!(pass_for(5, 5), "Left");
    }
}
