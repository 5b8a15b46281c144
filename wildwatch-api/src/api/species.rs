//! Species near a location
//!
//! POST /get-species-by-type answers "which species of this category have
//! been sighted near me, and how often?"

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use wildwatch_common::{aggregate_by_proximity, ProximityQuery, SpeciesSummary};

use super::{field_text, json_body};
use crate::{ApiResult, AppState};

/// Request body; every field may be a JSON string or number
#[derive(Debug, Deserialize)]
pub struct SpeciesByTypeRequest {
    #[serde(rename = "type")]
    pub sighting_type: Option<Value>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct SpeciesByTypeResponse {
    pub species: Vec<SpeciesSummary>,
}

/// POST /get-species-by-type
///
/// Validation happens before the store is queried; a rejected request never
/// yields a partial list.
pub async fn get_species_by_type(
    State(state): State<AppState>,
    payload: Result<Json<SpeciesByTypeRequest>, JsonRejection>,
) -> ApiResult<Json<SpeciesByTypeResponse>> {
    let request = json_body(payload)?;

    let sighting_type = field_text(request.sighting_type.as_ref());
    let latitude = field_text(request.latitude.as_ref());
    let longitude = field_text(request.longitude.as_ref());
    let query = ProximityQuery::parse(
        sighting_type.as_deref(),
        latitude.as_deref(),
        longitude.as_deref(),
    )?;

    let candidates = state.sightings.find_by_type(query.sighting_type).await?;
    let species = aggregate_by_proximity(&query, &candidates);

    info!(
        "get-species-by-type {} at ({}, {}): {} candidates, {} species",
        query.sighting_type,
        query.origin.latitude,
        query.origin.longitude,
        candidates.len(),
        species.len()
    );

    Ok(Json(SpeciesByTypeResponse { species }))
}

pub fn species_routes() -> Router<AppState> {
    Router::new().route("/get-species-by-type", post(get_species_by_type))
}
