use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};
use tablescore_core::GameRecord;

pub const SAVE_ENV: &str = "TABLESCORE_SAVE";
const SAVE_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedGame {
    pub version: u32,
    /// Seconds since the Unix epoch.
    #[serde(default)]
    pub saved_at: Option<u64>,
    pub record: GameRecord,
}

pub fn default_state_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(SAVE_ENV) {
        return Some(PathBuf::from(path));
    }
    std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".tablescore_state.json"))
}

pub fn save_state_file(record: &GameRecord, path: &Path) -> anyhow::Result<()> {
    let saved_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .map(|elapsed| elapsed.as_secs());
    let payload = SavedGame {
        version: SAVE_SCHEMA_VERSION,
        saved_at,
        record: record.clone(),
    };
    let body = serde_json::to_string_pretty(&payload).context("encode save")?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))
}

/// `Ok(None)` when nothing has been saved yet.
pub fn load_state_file(path: &Path) -> anyhow::Result<Option<GameRecord>> {
    let body = match fs::read_to_string(path) {
        Ok(body) => body,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err).with_context(|| format!("read {}", path.display())),
    };
    let payload: SavedGame =
        serde_json::from_str(&body).with_context(|| format!("parse {}", path.display()))?;
    if payload.version != SAVE_SCHEMA_VERSION {
        bail!(
            "unsupported save version {} (expected {})",
            payload.version,
            SAVE_SCHEMA_VERSION
        );
    }
    Ok(Some(payload.record))
}

pub fn clear_state_file(path: &Path) -> anyhow::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err).with_context(|| format!("remove {}", path.display())),
    }
}
