use crate::{ClaimBoard, SyncError};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::Arc;
use tablescore_core::GameRecord;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewerId(pub u64);

impl fmt::Display for ViewerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub type RecordListener = Arc<dyn Fn(&GameRecord) + Send + Sync>;

/// What travels between host and viewers.
#[derive(Serialize, Deserialize)]
struct SnapshotEnvelope {
    version: u64,
    record: GameRecord,
}

#[derive(Default)]
struct HubState {
    latest: Option<String>,
    version: u64,
    next_viewer: u64,
    viewers: BTreeSet<ViewerId>,
    listeners: HashMap<ViewerId, Vec<RecordListener>>,
}

/// Relay for one hosted game. The host publishes after every change; each
/// subscriber gets the latest record on subscribe and every record after.
/// Listeners run outside the hub's lock.
#[derive(Default)]
pub struct SyncHub {
    state: Mutex<HubState>,
    claims: ClaimBoard,
}

impl SyncHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Broadcasts a record and returns its version.
    pub fn publish(&self, record: &GameRecord) -> Result<u64, SyncError> {
        let (version, body, listeners) = {
            let mut state = self.state.lock();
            let version = state.version + 1;
            let body = serde_json::to_string(&SnapshotEnvelope {
                version,
                record: record.clone(),
            })
            .map_err(SyncError::Encode)?;
            state.version = version;
            state.latest = Some(body.clone());
            let listeners: Vec<RecordListener> = state.listeners.values().flatten().cloned().collect();
            (version, body, listeners)
        };
        self.claims.resize(record.state.players.len());
        debug!(game = %record.game_key, version, listeners = listeners.len(), "snapshot published");
        if !listeners.is_empty() {
            let received = decode(&body)?;
            for listener in &listeners {
                listener(&received);
            }
        }
        Ok(version)
    }

    /// Latest published record, if any.
    pub fn latest(&self) -> Result<Option<GameRecord>, SyncError> {
        let body = self.state.lock().latest.clone();
        body.as_deref().map(decode).transpose()
    }

    pub fn version(&self) -> u64 {
        self.state.lock().version
    }

    pub fn join(&self) -> ViewerId {
        let mut state = self.state.lock();
        state.next_viewer += 1;
        let viewer = ViewerId(state.next_viewer);
        state.viewers.insert(viewer);
        info!(%viewer, viewers = state.viewers.len(), "viewer joined");
        viewer
    }

    /// Drops the viewer's listeners and frees any seat it claimed.
    pub fn leave(&self, viewer: ViewerId) -> bool {
        let removed = {
            let mut state = self.state.lock();
            state.listeners.remove(&viewer);
            state.viewers.remove(&viewer)
        };
        if removed {
            self.claims.release_viewer(viewer);
            info!(%viewer, "viewer left");
        }
        removed
    }

    pub fn viewer_count(&self) -> usize {
        self.state.lock().viewers.len()
    }

    /// Registers a listener for `viewer`, replaying the latest record first.
    pub fn subscribe<F>(&self, viewer: ViewerId, listener: F) -> Result<(), SyncError>
    where
        F: Fn(&GameRecord) + Send + Sync + 'static,
    {
        let listener: RecordListener = Arc::new(listener);
        let latest = {
            let mut state = self.state.lock();
            if !state.viewers.contains(&viewer) {
                return Err(SyncError::UnknownViewer(viewer));
            }
            state.listeners.entry(viewer).or_default().push(listener.clone());
            state.latest.clone()
        };
        if let Some(body) = latest {
            listener(&decode(&body)?);
        }
        Ok(())
    }

    pub fn claims(&self) -> &ClaimBoard {
        &self.claims
    }

    pub fn claim_slot(&self, viewer: ViewerId, slot: usize) -> Result<bool, SyncError> {
        self.ensure_connected(viewer)?;
        self.claims.claim_slot(viewer, slot)
    }

    pub fn release_slot(&self, viewer: ViewerId, slot: usize) -> Result<bool, SyncError> {
        self.ensure_connected(viewer)?;
        Ok(self.claims.release_slot(viewer, slot))
    }

    pub fn on_claims_changed<F>(&self, listener: F)
    where
        F: Fn(&[Option<ViewerId>]) + Send + Sync + 'static,
    {
        self.claims.on_claims_changed(listener);
    }

    fn ensure_connected(&self, viewer: ViewerId) -> Result<(), SyncError> {
        if self.state.lock().viewers.contains(&viewer) {
            Ok(())
        } else {
            Err(SyncError::UnknownViewer(viewer))
        }
    }
}

fn decode(body: &str) -> Result<GameRecord, SyncError> {
    serde_json::from_str::<SnapshotEnvelope>(body)
        .map(|envelope| envelope.record)
        .map_err(SyncError::Decode)
}
