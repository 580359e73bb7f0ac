//! Loading and validation for the game catalog.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
