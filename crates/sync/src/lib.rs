//! In-process realtime collaborator: one host publishes records, viewers
//! follow on read-only replicas and claim seats.

pub mod claims;
pub mod error;
pub mod hub;
pub mod session;

pub use claims::*;
pub use error::*;
pub use hub::*;
pub use session::*;
