//! Sign-in with the external identity provider
//!
//! The token is handed to the configured [`IdentityVerifier`]; this service
//! never inspects it. A verified identity becomes (or refreshes) a local user
//! and is issued an opaque session token.
//!
//! [`IdentityVerifier`]: crate::capabilities::IdentityVerifier

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use wildwatch_common::db::{sessions, users};
use wildwatch_common::models::User;

use super::{json_body, required};
use crate::{ApiError, ApiResult, AppState};

#[derive(Debug, Deserialize)]
pub struct GoogleAuthRequest {
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GoogleAuthResponse {
    pub user: User,
    #[serde(rename = "sessionToken")]
    pub session_token: String,
}

/// POST /auth/google
pub async fn auth_google(
    State(state): State<AppState>,
    payload: Result<Json<GoogleAuthRequest>, JsonRejection>,
) -> ApiResult<Json<GoogleAuthResponse>> {
    let request = json_body(payload)?;
    let token = required(request.token).ok_or_else(ApiError::missing_fields)?;

    let identity = state.identity.verify(token.trim()).await.map_err(|e| {
        warn!("Sign-in rejected: {}", e);
        e
    })?;

    let user = users::upsert_user(&state.db, &identity.email, &identity.name).await?;
    let session_token = sessions::create_session(&state.db, &user.email).await?;
    info!("Signed in {}", user.email);

    Ok(Json(GoogleAuthResponse {
        user,
        session_token,
    }))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/google", post(auth_google))
}
