pub use tablescore_core::{GameCatalog, GameConfig, GameKind, HelperDef, PhaseKind, RoundPlan, ScoreKind};

pub const CATALOG_FILE: &str = "games.json";
