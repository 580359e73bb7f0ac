//! Core scoring logic. Keep this crate free of IO and platform concerns.

pub mod cards;
pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod games;
pub mod history;
pub mod record;
pub mod rng;
pub mod roster;
pub mod scoring;
pub mod state;
pub mod view;

pub use cards::*;
pub use config::*;
pub use engine::{Engine, GameBase};
pub use error::*;
pub use events::*;
pub use games::GameKind;
pub use history::*;
pub use record::*;
pub use rng::*;
pub use roster::*;
pub use scoring::*;
pub use state::*;
pub use view::*;
