//! Proximity aggregation of sightings by species
//!
//! Answers "which species of a given category have been sighted near this
//! location, and how often?" for the `get-species-by-type` endpoint.
//!
//! The candidate list is expected to already be restricted to the requested
//! category. Grouping is first-seen-wins: the first in-range sighting of a
//! species supplies the summary's image, location, description and id, so the
//! result depends on the order the store returns candidates in.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::geo::{self, Coordinate};
use crate::models::{Sighting, SightingType};

/// Fixed search radius around the query point (about two miles)
pub const SEARCH_RADIUS_KM: f64 = 3.21869;

/// Request-level validation failure; nothing is scanned when one occurs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid coordinates format")]
    InvalidCoordinates,

    #[error("Invalid sighting type")]
    UnknownType(String),
}

impl From<QueryError> for crate::Error {
    fn from(err: QueryError) -> Self {
        crate::Error::InvalidInput(err.to_string())
    }
}

/// Validated proximity query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityQuery {
    pub sighting_type: SightingType,
    pub origin: Coordinate,
}

impl ProximityQuery {
    /// Validate raw request values
    ///
    /// Absent or blank values are reported before coordinate parsing, and
    /// coordinates before the category, matching the order clients see.
    pub fn parse(
        sighting_type: Option<&str>,
        latitude: Option<&str>,
        longitude: Option<&str>,
    ) -> Result<Self, QueryError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.filter(|s| !s.trim().is_empty())
        }

        let (Some(sighting_type), Some(latitude), Some(longitude)) =
            (present(sighting_type), present(latitude), present(longitude))
        else {
            return Err(QueryError::MissingFields);
        };

        let origin =
            Coordinate::parse(latitude, longitude).ok_or(QueryError::InvalidCoordinates)?;

        let sighting_type = sighting_type
            .parse::<SightingType>()
            .map_err(|_| QueryError::UnknownType(sighting_type.to_string()))?;

        Ok(Self {
            sighting_type,
            origin,
        })
    }
}

/// One entry of the aggregation result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub species: String,
    pub image: String,
    /// First sighting's stored coordinates as `"<lat>, <lon>"`
    pub location: String,
    #[serde(serialize_with = "crate::time::serialize_display")]
    pub latest_time: DateTime<Utc>,
    pub frequency: u32,
    pub id: String,
    pub description: String,
}

impl SpeciesSummary {
    fn seed(sighting: &Sighting) -> Self {
        Self {
            species: sighting.species.clone(),
            image: sighting.image.clone(),
            location: format!("{}, {}", sighting.latitude.trim(), sighting.longitude.trim()),
            latest_time: sighting.created_at,
            frequency: 1,
            id: sighting.id.clone(),
            description: sighting.description.clone(),
        }
    }

    fn absorb(&mut self, sighting: &Sighting) {
        self.frequency += 1;
        if sighting.created_at > self.latest_time {
            self.latest_time = sighting.created_at;
        }
    }
}

/// Distance from `origin` to the candidate, or `None` if the candidate's
/// coordinates are missing or malformed
fn candidate_distance_km(origin: &Coordinate, sighting: &Sighting) -> Option<f64> {
    if sighting.latitude.trim().is_empty() || sighting.longitude.trim().is_empty() {
        debug!(id = %sighting.id, "Skipping sighting without coordinates");
        return None;
    }

    match Coordinate::parse(&sighting.latitude, &sighting.longitude) {
        Some(position) => Some(geo::haversine_km(*origin, position)),
        None => {
            warn!(
                id = %sighting.id,
                latitude = %sighting.latitude,
                longitude = %sighting.longitude,
                "Skipping sighting with unparseable coordinates"
            );
            None
        }
    }
}

/// Group in-range candidates by species
///
/// Returns one summary per distinct species (exact, case-sensitive match) in
/// the order each species was first encountered. Candidates that cannot be
/// placed are skipped; they never fail the call.
pub fn aggregate_by_proximity(query: &ProximityQuery, candidates: &[Sighting]) -> Vec<SpeciesSummary> {
    let mut summaries: Vec<SpeciesSummary> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for sighting in candidates {
        let Some(distance) = candidate_distance_km(&query.origin, sighting) else {
            continue;
        };
        if !distance.is_finite() || distance > SEARCH_RADIUS_KM {
            continue;
        }

        match index.get(sighting.species.as_str()) {
            Some(&i) => summaries[i].absorb(sighting),
            None => {
                index.insert(sighting.species.as_str(), summaries.len());
                summaries.push(SpeciesSummary::seed(sighting));
            }
        }
    }

    debug!(
        sighting_type = %query.sighting_type,
        candidates = candidates.len(),
        species = summaries.len(),
        "Aggregated sightings by proximity"
    );

    summaries
}
