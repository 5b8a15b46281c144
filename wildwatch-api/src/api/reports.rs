//! Location reports (hazards, nuisances) dropped by users

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use wildwatch_common::db::reports;
use wildwatch_common::geo::Coordinate;

use super::{field_text, json_body, required};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct SubmitReportRequest {
    pub report_type: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SubmitReportResponse {
    pub message: String,
    pub id: String,
}

/// POST /submit-report
pub async fn submit_report(
    State(state): State<AppState>,
    payload: Result<Json<SubmitReportRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmitReportResponse>)> {
    let request = json_body(payload)?;

    let (Some(report_type), Some(latitude), Some(longitude), Some(email)) = (
        required(request.report_type),
        required(field_text(request.latitude.as_ref())),
        required(field_text(request.longitude.as_ref())),
        required(request.email),
    ) else {
        return Err(ApiError::missing_fields());
    };

    let position = Coordinate::parse(&latitude, &longitude).ok_or_else(ApiError::invalid_coordinates)?;

    let report = reports::insert_report(
        &state.db,
        report_type.trim(),
        position.latitude,
        position.longitude,
        email.trim(),
    )
    .await?;

    info!("Recorded {} report {} from {}", report.report_type, report.id, report.email);

    Ok((
        StatusCode::CREATED,
        Json(SubmitReportResponse {
            message: "Report submitted successfully".to_string(),
            id: report.id,
        }),
    ))
}

pub fn report_routes() -> Router<AppState> {
    Router::new().route("/submit-report", post(submit_report))
}
