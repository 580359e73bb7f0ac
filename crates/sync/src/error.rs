use crate::ViewerId;
use tablescore_core::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SyncError {
    #[error("viewer {0} is not connected")]
    UnknownViewer(ViewerId),
    #[error("seat {slot} does not exist ({slots} seats)")]
    SlotOutOfRange { slot: usize, slots: usize },
    #[error("game not found")]
    NothingPublished,
    #[error("encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("decode snapshot: {0}")]
    Decode(#[source] serde_json::Error),
    #[error(transparent)]
    Engine(#[from] EngineError),
}
