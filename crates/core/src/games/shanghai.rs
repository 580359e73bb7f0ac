use super::ScoringRules;
use crate::engine::input::{has_content, parse_scores, require_single_zero};
use crate::engine::GameBase;
use crate::{RngState, ValidationError};

const INDIVIDUAL_GOALS: &str = "(INDIVIDUAL GOALS)";
const TEAM_GOALS: &str = "(INDIVIDUAL TEAM GOALS)";

/// Contract rummy: ten contracts, lowest total wins, the player who goes out
/// scores zero.
#[derive(Debug, Clone)]
pub(crate) struct Shanghai {
    /// Per-seat contract order when goals are randomized. Partners share one.
    pub(crate) random_map: Option<Vec<Vec<String>>>,
}

impl Shanghai {
    pub(crate) fn new(base: &GameBase, rng: &mut RngState) -> Self {
        let random_map = base.settings.randomize.then(|| {
            let contracts = base.config.contracts();
            if base.settings.use_teams {
                (0..base.team_count())
                    .flat_map(|_| {
                        let goals = rng.shuffled(contracts);
                        [goals.clone(), goals]
                    })
                    .collect()
            } else {
                (0..base.player_count())
                    .map(|_| rng.shuffled(contracts))
                    .collect()
            }
        });
        Self { random_map }
    }

    pub(crate) fn goal(&self, player: usize, round_idx: usize) -> Option<&str> {
        self.random_map
            .as_ref()?
            .get(player)?
            .get(round_idx)
            .map(String::as_str)
    }

    fn check_teams(values: &[i64]) -> Result<(), ValidationError> {
        let mut winning_teams = 0;
        for pair in values.chunks(2) {
            let zeros = pair.iter().filter(|value| **value == 0).count();
            if zeros == pair.len() {
                winning_teams += 1;
            } else if zeros > 0 {
                return Err(ValidationError::PartialTeamZero);
            }
        }
        match winning_teams {
            0 => Err(ValidationError::NoWinningTeam),
            1 => Ok(()),
            _ => Err(ValidationError::MultipleWinningTeams),
        }
    }
}

impl ScoringRules for Shanghai {
    fn validate(&self, base: &GameBase, raw: &[String]) -> Result<(), ValidationError> {
        let values = parse_scores(raw)?;
        if let Some(player) = values.iter().position(|value| value % 5 != 0) {
            return Err(ValidationError::NotMultipleOfFive { player });
        }
        if !has_content(raw) {
            return Err(ValidationError::EmptyContract);
        }
        if base.settings.use_teams {
            Self::check_teams(&values)
        } else {
            require_single_zero(&values).map(|_| ())
        }
    }

    fn hero(&self, base: &GameBase) -> String {
        if self.random_map.is_some() {
            let text = if base.settings.use_teams {
                TEAM_GOALS
            } else {
                INDIVIDUAL_GOALS
            };
            return text.to_string();
        }
        base.config
            .contracts()
            .get(base.round as usize - 1)
            .cloned()
            .unwrap_or_else(|| "Finish".to_string())
    }

    fn round_description(&self, base: &GameBase, player: usize, round_idx: usize) -> Option<String> {
        if self.random_map.is_some() {
            return self.goal(player, round_idx).map(str::to_string);
        }
        if player == 0 {
            return base.config.contracts().get(round_idx).cloned();
        }
        None
    }
}
