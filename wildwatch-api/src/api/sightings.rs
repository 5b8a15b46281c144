//! Sighting listing and photo submission

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use wildwatch_common::geo::Coordinate;
use wildwatch_common::models::NewSighting;
use wildwatch_common::{Sighting, SightingType};

use super::{field_text, json_body, required};
use crate::{ApiError, ApiResult, AppState};

/// Largest accepted upload body (base64 inflates photos by a third)
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct SightingsResponse {
    pub sightings: Vec<Sighting>,
}

/// GET /get-sightings
///
/// Every recorded sighting in storage order.
pub async fn get_sightings(State(state): State<AppState>) -> ApiResult<Json<SightingsResponse>> {
    let sightings = state.sightings.list_all().await?;
    Ok(Json(SightingsResponse { sightings }))
}

#[derive(Debug, Deserialize)]
pub struct UploadImageRequest {
    /// Base64 image, optionally as a `data:` URL
    pub image: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UploadImageResponse {
    pub id: String,
    pub species: String,
    #[serde(rename = "type")]
    pub sighting_type: SightingType,
    pub description: String,
    pub image: String,
}

/// Strip a `data:image/...;base64,` prefix if the client sent one
fn base64_payload(image: &str) -> &str {
    match image.split_once(";base64,") {
        Some((prefix, data)) if prefix.starts_with("data:") => data,
        _ => image,
    }
}

/// POST /upload-image
///
/// Classifies the photo, hosts it, records the sighting and credits the
/// reporter.
pub async fn upload_image(
    State(state): State<AppState>,
    payload: Result<Json<UploadImageRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UploadImageResponse>)> {
    let request = json_body(payload)?;

    let (Some(image), Some(latitude), Some(longitude), Some(email)) = (
        required(request.image),
        required(field_text(request.latitude.as_ref())),
        required(field_text(request.longitude.as_ref())),
        required(request.email),
    ) else {
        return Err(ApiError::missing_fields());
    };

    if Coordinate::parse(&latitude, &longitude).is_none() {
        return Err(ApiError::invalid_coordinates());
    }

    let bytes = STANDARD
        .decode(base64_payload(image.trim()))
        .map_err(|_| ApiError::BadRequest("Invalid image encoding".to_string()))?;

    let classification = state.classifier.classify(&bytes).await?;
    if classification.species.trim().is_empty() {
        return Err(ApiError::Upstream("Classifier returned no species".to_string()));
    }

    let image_url = state.images.upload(&bytes).await?;

    let sighting = state
        .sightings
        .insert(NewSighting {
            latitude: latitude.trim().to_string(),
            longitude: longitude.trim().to_string(),
            image: image_url,
            sighting_type: classification.sighting_type,
            species: classification.species,
            description: classification.description,
            email: email.trim().to_string(),
        })
        .await?;

    info!(
        "Recorded {} sighting {} ({}) from {}",
        sighting.sighting_type, sighting.id, sighting.species, sighting.email
    );

    Ok((
        StatusCode::CREATED,
        Json(UploadImageResponse {
            id: sighting.id,
            species: sighting.species,
            sighting_type: sighting.sighting_type,
            description: sighting.description,
            image: sighting.image,
        }),
    ))
}

pub fn sighting_routes() -> Router<AppState> {
    Router::new()
        .route("/get-sightings", get(get_sightings))
        .route(
            "/upload-image",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
}
