//! Database bootstrap and queries

pub mod init;
pub mod reports;
pub mod sessions;
pub mod sightings;
pub mod users;

pub use init::*;
pub use sightings::{SightingStore, SqliteSightingStore};
