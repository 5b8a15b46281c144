//! Error types for wildwatch-api
//!
//! Every failure reaches the client as `{"error": "<message>"}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;
use wildwatch_common::QueryError;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("{0}")]
    BadRequest(String),

    /// A collaborator answered with something unusable (502)
    #[error("{0}")]
    Upstream(String),

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),

    /// Request validation for proximity queries (400)
    #[error(transparent)]
    Query(#[from] QueryError),

    /// wildwatch-common error
    #[error(transparent)]
    Common(#[from] wildwatch_common::Error),
}

impl ApiError {
    pub fn missing_fields() -> Self {
        ApiError::Query(QueryError::MissingFields)
    }

    pub fn invalid_coordinates() -> Self {
        ApiError::Query(QueryError::InvalidCoordinates)
    }

    fn status(&self) -> StatusCode {
        use wildwatch_common::Error as Common;

        match self {
            ApiError::BadRequest(_) | ApiError::Query(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Common(err) => match err {
                Common::InvalidInput(_) => StatusCode::BAD_REQUEST,
                Common::NotFound(_) => StatusCode::NOT_FOUND,
                Common::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                Common::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                Common::Database(_) | Common::Io(_) | Common::Config(_) | Common::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("{} {}", status.as_u16(), message);
        }

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
