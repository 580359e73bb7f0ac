use crate::games::GameKind;
use crate::{Engine, Phase, Player, Suit};
use serde::Serialize;

/// Who is looking at the table. Viewers follow a hosted game and may have
/// claimed a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perspective {
    Solo,
    Host,
    Viewer { player: Option<usize> },
}

impl Perspective {
    pub fn is_viewer(self) -> bool {
        matches!(self, Perspective::Viewer { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    Dealer,
    Starter,
}

impl Badge {
    pub fn label(self) -> &'static str {
        match self {
            Badge::Dealer => "DEALER",
            Badge::Starter => "STARTER",
        }
    }
}

/// A randomized contract as one perspective may see it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GoalView {
    Shown(String),
    /// Available on a hold-to-peek control only.
    Peek(String),
    Hidden,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerView {
    pub index: usize,
    pub name: String,
    pub total: i64,
    pub badge: Option<Badge>,
    pub detail: Option<String>,
    pub goal: Option<GoalView>,
    pub pending: String,
    pub starred: bool,
    pub modifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamView {
    pub label: String,
    pub members: [usize; 2],
    pub goal: Option<GoalView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Standing {
    pub name: String,
    pub score: i64,
}

/// Everything a front end needs to draw the current table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub title: String,
    /// Seat name for viewers ("Spectator" when no seat is claimed).
    pub identity: Option<String>,
    pub hero: String,
    pub phase: Phase,
    pub trump: Option<Suit>,
    pub action_label: Option<&'static str>,
    pub can_undo: bool,
    pub players: Vec<PlayerView>,
    pub teams: Vec<TeamView>,
    pub is_game_over: bool,
    pub winner_text: Option<String>,
}

fn goal_for(perspective: Perspective, goal: &str, own: bool) -> GoalView {
    match perspective {
        Perspective::Solo => GoalView::Shown(goal.to_string()),
        Perspective::Host => GoalView::Peek(goal.to_string()),
        Perspective::Viewer { .. } if own => GoalView::Shown(goal.to_string()),
        Perspective::Viewer { .. } => GoalView::Hidden,
    }
}

fn bid_text(player: &Player) -> String {
    if player.is_blind_nil {
        "Blind Nil".to_string()
    } else if player.bid == 0 {
        "Nil".to_string()
    } else {
        player.bid.to_string()
    }
}

impl Engine {
    /// Final ranking units: partnerships in team play, players otherwise.
    pub fn standings(&self) -> Vec<Standing> {
        let players = self.players();
        if !self.settings().use_teams {
            return players
                .iter()
                .map(|player| Standing {
                    name: player.name.clone(),
                    score: player.total,
                })
                .collect();
        }
        players
            .chunks(2)
            .enumerate()
            .map(|(team, pair)| {
                let names: Vec<&str> = pair.iter().map(|p| p.name.as_str()).collect();
                // Spades partners carry the same total, so it is not summed.
                let score = if self.kind() == GameKind::Spades {
                    pair[0].total
                } else {
                    pair.iter().map(|p| p.total).sum()
                };
                Standing {
                    name: format!("Team {} ({})", team + 1, names.join(" & ")),
                    score,
                }
            })
            .collect()
    }

    pub fn winners(&self) -> Vec<String> {
        let standings = self.standings();
        let Some(best) = self.config().kind.best(standings.iter().map(|s| s.score)) else {
            return Vec::new();
        };
        standings
            .into_iter()
            .filter(|standing| standing.score == best)
            .map(|standing| standing.name)
            .collect()
    }

    pub fn round_title(&self) -> String {
        match self.hand_size() {
            Some(hand_size) => {
                let stage = match self.phase() {
                    Phase::Bid => "Bidding",
                    Phase::Score => "Scoring",
                };
                format!("{}: {} Cards ({})", self.config().name, hand_size, stage)
            }
            None => format!("{}: Round {}", self.config().name, self.round()),
        }
    }

    fn current_goal(&self, player: usize) -> Option<&str> {
        let round_idx = self.round() as usize - 1;
        self.random_map()?
            .get(player)?
            .get(round_idx)
            .map(String::as_str)
    }

    fn badge_for(&self, index: usize) -> Option<Badge> {
        if self.config().has_starter {
            return (self.manual_starter() == Some(index)).then_some(Badge::Starter);
        }
        if self.config().has_dealer && self.dealer_index() == Some(index) {
            return Some(Badge::Dealer);
        }
        None
    }

    fn detail_for(&self, player: &Player) -> Option<String> {
        match (self.kind(), self.phase()) {
            (GameKind::Spades, Phase::Score) => {
                let bags = if player.bags > 0 {
                    format!(" (Bags: {})", player.bags)
                } else {
                    String::new()
                };
                Some(format!("Bid: {}{}", bid_text(player), bags))
            }
            (GameKind::OldHell, Phase::Score) => Some(format!("Bid: {}", player.bid)),
            _ => None,
        }
    }

    pub fn view(&self, perspective: Perspective) -> TableView {
        let use_teams = self.settings().use_teams;
        let viewing = match perspective {
            Perspective::Viewer { player } => player,
            _ => None,
        };
        let staged = self.staged_inputs();
        let players = self
            .players()
            .iter()
            .enumerate()
            .map(|(index, player)| PlayerView {
                index,
                name: player.name.clone(),
                total: player.total,
                badge: self.badge_for(index),
                detail: self.detail_for(player),
                goal: (!use_teams)
                    .then(|| self.current_goal(index))
                    .flatten()
                    .map(|goal| goal_for(perspective, goal, viewing == Some(index))),
                pending: staged.get(index).cloned().unwrap_or_default(),
                starred: self.stars().get(index).copied().unwrap_or(false),
                modifiers: self.modifiers().get(index).cloned().unwrap_or_default(),
            })
            .collect();
        let teams = if use_teams {
            (0..self.players().len() / 2)
                .map(|team| {
                    let members = [team * 2, team * 2 + 1];
                    let own = viewing.is_some_and(|seat| members.contains(&seat));
                    TeamView {
                        label: format!("Team {}", team + 1),
                        members,
                        goal: self
                            .current_goal(members[0])
                            .map(|goal| goal_for(perspective, goal, own)),
                    }
                })
                .collect()
        } else {
            Vec::new()
        };
        let is_game_over = self.is_game_over();
        let action_label = (!is_game_over && !perspective.is_viewer()).then_some(match self.phase() {
            Phase::Bid => "Lock Bids",
            Phase::Score => "Submit Scores",
        });
        let identity = viewing
            .and_then(|seat| self.players().get(seat).map(|p| p.name.clone()))
            .or_else(|| perspective.is_viewer().then(|| "Spectator".to_string()));
        TableView {
            title: self.round_title(),
            identity,
            hero: self.hero(),
            phase: self.phase(),
            trump: self.current_trump(),
            action_label,
            can_undo: !self.history().is_empty() && !perspective.is_viewer(),
            players,
            teams,
            is_game_over,
            winner_text: is_game_over.then(|| format!("Winner: {}", self.winners().join(", "))),
        }
    }
}
