use crate::{GameConfig, Player, RosterError};
use std::collections::HashSet;

/// One name slot as picked during setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameChoice {
    Unset,
    Preset(String),
    Custom(String),
}

impl NameChoice {
    fn resolve(&self, fallback: String) -> String {
        match self {
            NameChoice::Unset => fallback,
            NameChoice::Preset(name) | NameChoice::Custom(name) => {
                let trimmed = name.trim();
                if trimmed.is_empty() {
                    fallback
                } else {
                    trimmed.to_string()
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct RosterRequest {
    pub player_count: usize,
    pub use_teams: bool,
    /// Slot order: players in seat order; in team mode partners sit next to
    /// each other (team 1 member a, team 1 member b, team 2 member a, ...).
    pub names: Vec<NameChoice>,
}

impl RosterRequest {
    pub fn named<S: AsRef<str>>(names: &[S], use_teams: bool) -> Self {
        Self {
            player_count: names.len(),
            use_teams,
            names: names
                .iter()
                .map(|name| NameChoice::Custom(name.as_ref().to_string()))
                .collect(),
        }
    }
}

fn fallback_name(slot: usize, use_teams: bool) -> String {
    if use_teams {
        let team = slot / 2 + 1;
        let suffix = if slot % 2 == 0 { 'a' } else { 'b' };
        format!("P{team}-{suffix}")
    } else {
        format!("P{}", slot + 1)
    }
}

pub fn build_roster(config: &GameConfig, request: &RosterRequest) -> Result<Vec<Player>, RosterError> {
    let count = request.player_count;
    let min = config.min_players.unwrap_or(1).max(1);
    if count < min {
        return Err(RosterError::TooFewPlayers { min });
    }
    if let Some(max) = config.max_players {
        if count > max {
            return Err(RosterError::TooManyPlayers { max });
        }
    }
    if request.use_teams {
        if !config.has_teams {
            return Err(RosterError::TeamsUnsupported {
                game: config.name.clone(),
            });
        }
        if count % 2 != 0 {
            return Err(RosterError::OddTeamRoster { count });
        }
    }

    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(count);
    for slot in 0..count {
        let choice = request.names.get(slot).unwrap_or(&NameChoice::Unset);
        let name = choice.resolve(fallback_name(slot, request.use_teams));
        if !seen.insert(name.clone()) {
            return Err(RosterError::DuplicateName(name));
        }
        players.push(Player::new(name));
    }
    Ok(players)
}

/// Preset names still free for a slot, given everything already picked.
pub fn available_presets<'a>(presets: &'a [String], taken: &[NameChoice], slot: usize) -> Vec<&'a str> {
    let used: HashSet<&str> = taken
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != slot)
        .filter_map(|(_, choice)| match choice {
            NameChoice::Preset(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();
    presets
        .iter()
        .map(String::as_str)
        .filter(|name| !used.contains(name))
        .collect()
}
