use crate::{SyncError, SyncHub, ViewerId};
use parking_lot::Mutex;
use std::sync::Arc;
use tablescore_core::{
    Engine, EngineError, EventBus, GameCatalog, GameRecord, Perspective, RoundRecord, TableView,
};
use tracing::warn;

/// The only writer of a hosted game. Every accepted change is published.
pub struct HostSession {
    engine: Engine,
    hub: Arc<SyncHub>,
}

impl HostSession {
    pub fn start(engine: Engine, hub: Arc<SyncHub>) -> Result<Self, SyncError> {
        hub.publish(&engine.export())?;
        Ok(Self { engine, hub })
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn hub(&self) -> &Arc<SyncHub> {
        &self.hub
    }

    pub fn view(&self) -> TableView {
        self.engine.view(Perspective::Host)
    }

    pub fn submit_round(
        &mut self,
        raw: &[String],
        modifiers: &[Vec<String>],
        events: &mut EventBus,
    ) -> Result<(), SyncError> {
        self.engine
            .submit_round(raw, modifiers, events)
            .map_err(EngineError::from)?;
        self.publish()
    }

    pub fn undo(&mut self, events: &mut EventBus) -> Result<Option<RoundRecord>, SyncError> {
        let undone = self.engine.undo(events).map_err(EngineError::from)?;
        if undone.is_some() {
            self.publish()?;
        }
        Ok(undone)
    }

    /// Runs a staging setter (trump, starter, toggles) and republishes.
    pub fn stage<F>(&mut self, change: F) -> Result<(), SyncError>
    where
        F: FnOnce(&mut Engine) -> Result<(), EngineError>,
    {
        change(&mut self.engine)?;
        self.publish()
    }

    fn publish(&self) -> Result<(), SyncError> {
        self.hub.publish(&self.engine.export()).map(|_| ())
    }
}

/// A viewer's copy of the hosted game, rebuilt from each published record.
/// Exposes no mutators.
pub struct Replica {
    catalog: GameCatalog,
    engine: Option<Engine>,
    seat: Option<usize>,
}

impl Replica {
    pub fn new(catalog: GameCatalog) -> Self {
        Self {
            catalog,
            engine: None,
            seat: None,
        }
    }

    /// Joins `hub` and keeps a shared replica current.
    pub fn follow(hub: &SyncHub, catalog: GameCatalog) -> Result<(ViewerId, Arc<Mutex<Replica>>), SyncError> {
        let viewer = hub.join();
        let replica = Arc::new(Mutex::new(Replica::new(catalog)));
        let target = replica.clone();
        hub.subscribe(viewer, move |record| {
            if let Err(err) = target.lock().apply(record) {
                warn!(%viewer, error = %err, "replica rejected snapshot");
            }
        })?;
        Ok((viewer, replica))
    }

    pub fn apply(&mut self, record: &GameRecord) -> Result<(), SyncError> {
        self.engine = Some(Engine::import_from_catalog(record, &self.catalog)?);
        Ok(())
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn seat(&self) -> Option<usize> {
        self.seat
    }

    pub fn set_seat(&mut self, seat: Option<usize>) {
        self.seat = seat;
    }

    pub fn view(&self) -> Option<TableView> {
        self.engine
            .as_ref()
            .map(|engine| engine.view(Perspective::Viewer { player: self.seat }))
    }
}
