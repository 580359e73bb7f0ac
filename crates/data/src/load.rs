use crate::schema::{GameCatalog, GameConfig, GameKind, PhaseKind, RoundPlan, CATALOG_FILE};
use anyhow::{bail, Context};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../../../assets/games.json");

pub fn load_catalog(path: &Path) -> anyhow::Result<GameCatalog> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let catalog = parse_catalog(&raw).with_context(|| format!("parse {}", path.display()))?;
    debug!(path = %path.display(), games = catalog.games.len(), "catalog loaded");
    Ok(catalog)
}

/// Loads `games.json` from an assets directory.
pub fn load_catalog_dir(dir: &Path) -> anyhow::Result<GameCatalog> {
    load_catalog(&dir.join(CATALOG_FILE))
}

/// The catalog compiled into the binary.
pub fn builtin_catalog() -> anyhow::Result<GameCatalog> {
    parse_catalog(BUILTIN_CATALOG).context("parse built-in catalog")
}

pub fn parse_catalog(raw: &str) -> anyhow::Result<GameCatalog> {
    let catalog: GameCatalog = serde_json::from_str(raw)?;
    validate_catalog(&catalog)?;
    Ok(catalog)
}

pub fn validate_catalog(catalog: &GameCatalog) -> anyhow::Result<()> {
    let mut keys = HashSet::new();
    for game in &catalog.games {
        validate_game(game)?;
        if !keys.insert(game.key.as_str()) {
            bail!("duplicate game key {}", game.key);
        }
    }
    let mut names = HashSet::new();
    for name in &catalog.common_names {
        if name.trim().is_empty() {
            bail!("common name cannot be empty");
        }
        if !names.insert(name.as_str()) {
            bail!("duplicate common name {}", name);
        }
    }
    Ok(())
}

fn validate_game(game: &GameConfig) -> anyhow::Result<()> {
    let key = &game.key;
    if key.trim().is_empty() {
        bail!("game key cannot be empty");
    }
    if game.name.trim().is_empty() {
        bail!("game {} has an empty name", key);
    }
    match &game.phases[..] {
        [PhaseKind::Score] | [PhaseKind::Bid, PhaseKind::Score] => {}
        other => bail!("game {} has unsupported phases {:?}", key, other),
    }
    match (game.is_two_phase(), GameKind::from_key(key).is_two_phase()) {
        (true, false) => bail!("game {} has a bid phase but no bidding rules", key),
        (false, true) => bail!("game {} needs a bid phase before scoring", key),
        _ => {}
    }
    match &game.rounds {
        Some(RoundPlan::Count(0)) => bail!("game {} has a zero round count", key),
        Some(RoundPlan::Contracts(contracts)) => {
            if contracts.is_empty() {
                bail!("game {} has an empty contract list", key);
            }
            if let Some(index) = contracts.iter().position(|c| c.trim().is_empty()) {
                bail!("game {} has empty contract[{}]", key, index);
            }
        }
        _ => {}
    }
    if let Some(target) = game.target {
        if target <= 0 {
            bail!("game {} has non-positive target {}", key, target);
        }
    }
    if let (Some(min), Some(max)) = (game.min_players, game.max_players) {
        if min > max {
            bail!("game {} needs {} players but allows only {}", key, min, max);
        }
    }
    if game.deck_size == Some(0) {
        bail!("game {} has an empty deck", key);
    }
    let mut helper_ids = HashSet::new();
    for helper in &game.helpers {
        if helper.id.trim().is_empty() {
            bail!("game {} has a helper without id", key);
        }
        if !helper_ids.insert(helper.id.as_str()) {
            bail!("game {} has duplicate helper {}", key, helper.id);
        }
    }
    Ok(())
}
