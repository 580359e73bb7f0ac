use serde::{Deserialize, Serialize};

/// Which direction wins: lowest total, highest total, or first to a target.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreKind {
    LowScore,
    HighScore,
    TargetScore,
}

impl ScoreKind {
    pub fn prefers_low(self) -> bool {
        matches!(self, ScoreKind::LowScore)
    }

    /// Best of `totals` for this kind of game.
    pub fn best(self, totals: impl IntoIterator<Item = i64>) -> Option<i64> {
        if self.prefers_low() {
            totals.into_iter().min()
        } else {
            totals.into_iter().max()
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Bid,
    Score,
}

/// Either a named contract per round or a plain round count.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoundPlan {
    Contracts(Vec<String>),
    Count(u32),
}

impl RoundPlan {
    pub fn limit(&self) -> u32 {
        match self {
            RoundPlan::Contracts(contracts) => contracts.len() as u32,
            RoundPlan::Count(count) => *count,
        }
    }

    pub fn contracts(&self) -> &[String] {
        match self {
            RoundPlan::Contracts(contracts) => contracts,
            RoundPlan::Count(_) => &[],
        }
    }
}

/// Per-player bonus button (Qwirkle tiles, Hearts moon).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HelperDef {
    pub id: String,
    pub label: String,
    pub value: i64,
    #[serde(default)]
    pub is_end: bool,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameConfig {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    pub kind: ScoreKind,
    #[serde(default)]
    pub target: Option<i64>,
    #[serde(default = "default_phases")]
    pub phases: Vec<PhaseKind>,
    #[serde(default)]
    pub rounds: Option<RoundPlan>,
    #[serde(default)]
    pub deck_size: Option<u32>,
    #[serde(default)]
    pub has_teams: bool,
    #[serde(default)]
    pub has_randomize: bool,
    #[serde(default)]
    pub has_dealer: bool,
    #[serde(default)]
    pub has_stars: bool,
    #[serde(default)]
    pub has_starter: bool,
    #[serde(default)]
    pub has_blind_nil: bool,
    #[serde(default)]
    pub min_players: Option<usize>,
    #[serde(default)]
    pub max_players: Option<usize>,
    #[serde(default)]
    pub helpers: Vec<HelperDef>,
}

fn default_phases() -> Vec<PhaseKind> {
    vec![PhaseKind::Score]
}

pub const GENERIC_ROUNDS: u32 = 99;

impl GameConfig {
    /// Fallback descriptor for keys the catalog does not know.
    pub fn generic(key: &str) -> Self {
        Self {
            key: key.to_string(),
            name: key.to_string(),
            color: None,
            kind: ScoreKind::HighScore,
            target: None,
            phases: default_phases(),
            rounds: Some(RoundPlan::Count(GENERIC_ROUNDS)),
            deck_size: None,
            has_teams: false,
            has_randomize: false,
            has_dealer: false,
            has_stars: false,
            has_starter: false,
            has_blind_nil: false,
            min_players: None,
            max_players: None,
            helpers: Vec::new(),
        }
    }

    pub fn helper(&self, id: &str) -> Option<&HelperDef> {
        self.helpers.iter().find(|helper| helper.id == id)
    }

    pub fn round_limit(&self) -> Option<u32> {
        self.rounds.as_ref().map(RoundPlan::limit)
    }

    pub fn contracts(&self) -> &[String] {
        self.rounds.as_ref().map(RoundPlan::contracts).unwrap_or(&[])
    }

    pub fn is_two_phase(&self) -> bool {
        self.phases.contains(&PhaseKind::Bid)
    }
}

/// All known games plus the preset name list offered during roster entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameCatalog {
    pub games: Vec<GameConfig>,
    #[serde(default)]
    pub common_names: Vec<String>,
}

impl GameCatalog {
    pub fn get(&self, key: &str) -> Option<&GameConfig> {
        self.games.iter().find(|game| game.key == key)
    }

    pub fn config_or_generic(&self, key: &str) -> GameConfig {
        self.get(key)
            .cloned()
            .unwrap_or_else(|| GameConfig::generic(key))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.games.iter().map(|game| game.key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_plan_accepts_list_or_count() {
        let list: RoundPlan = serde_json::from_str(r#"["a","b"]"#).expect("list");
        assert_eq!(list.limit(), 2);
        assert_eq!(list.contracts(), ["a".to_string(), "b".to_string()]);
        let count: RoundPlan = serde_json::from_str("13").expect("count");
        assert_eq!(count.limit(), 13);
        assert!(count.contracts().is_empty());
    }

    #[test]
    fn unknown_key_falls_back_to_generic() {
        let catalog = GameCatalog::default();
        let config = catalog.config_or_generic("yahtzee");
        assert_eq!(config.key, "yahtzee");
        assert_eq!(config.round_limit(), Some(GENERIC_ROUNDS));
        assert!(!config.is_two_phase());
    }

    #[test]
    fn best_follows_score_kind() {
        assert_eq!(ScoreKind::LowScore.best([4, -2, 9]), Some(-2));
        assert_eq!(ScoreKind::HighScore.best([4, -2, 9]), Some(9));
        assert_eq!(ScoreKind::TargetScore.best(Vec::new()), None);
    }
}
