//! wildwatch-api library - wildlife sighting HTTP service
//!
//! Exposes the router and application state for the binary and for
//! integration tests.

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use wildwatch_common::db::{SightingStore, SqliteSightingStore};

pub mod api;
pub mod capabilities;
pub mod cli;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

use crate::capabilities::{IdentityVerifier, ImageClassifier, ImageStore, NotConfigured};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (reports and users)
    pub db: SqlitePool,
    /// Candidate source for listing and aggregation
    pub sightings: Arc<dyn SightingStore>,
    pub identity: Arc<dyn IdentityVerifier>,
    pub classifier: Arc<dyn ImageClassifier>,
    pub images: Arc<dyn ImageStore>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// SQLite-backed state with every external collaborator unconfigured
    pub fn new(db: SqlitePool) -> Self {
        Self {
            sightings: Arc::new(SqliteSightingStore::new(db.clone())),
            db,
            identity: Arc::new(NotConfigured),
            classifier: Arc::new(NotConfigured),
            images: Arc::new(NotConfigured),
            startup_time: Utc::now(),
        }
    }

    pub fn with_sighting_store(mut self, store: Arc<dyn SightingStore>) -> Self {
        self.sightings = store;
        self
    }

    pub fn with_identity_verifier(mut self, verifier: Arc<dyn IdentityVerifier>) -> Self {
        self.identity = verifier;
        self
    }

    pub fn with_image_classifier(mut self, classifier: Arc<dyn ImageClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_image_store(mut self, images: Arc<dyn ImageStore>) -> Self {
        self.images = images;
        self
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::species_routes())
        .merge(api::sighting_routes())
        .merge(api::report_routes())
        .merge(api::auth_routes())
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
