//! HTTP API handlers for wildwatch-api

pub mod auth;
pub mod health;
pub mod reports;
pub mod sightings;
pub mod species;

pub use auth::{auth_google, auth_routes};
pub use health::{health_check, health_routes, BuildInfo};
pub use reports::{report_routes, submit_report};
pub use sightings::{get_sightings, sighting_routes, upload_image};
pub use species::{get_species_by_type, species_routes};

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde_json::Value;

use crate::ApiError;

/// Unwrap a JSON body, reporting malformed bodies as `{"error": ...}` 400s
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Text of a field that may arrive as a JSON string or number
///
/// `null` counts as absent. Other JSON kinds come back as their JSON text,
/// which then fails numeric parsing.
pub(crate) fn field_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// A required text field, treating blank strings as absent
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
