//! # WildWatch Common Library
//!
//! Shared code for the WildWatch sighting service:
//! - Sighting, report and user models
//! - Great-circle distance math
//! - Proximity aggregation of sightings by species
//! - SQLite bootstrap and the sighting store
//! - Configuration loading and root folder resolution

pub mod aggregate;
pub mod config;
pub mod db;
pub mod error;
pub mod geo;
pub mod models;
pub mod time;

pub use aggregate::{aggregate_by_proximity, ProximityQuery, QueryError, SpeciesSummary};
pub use error::{Error, Result};
pub use models::{Sighting, SightingType};
