//! External collaborators behind async traits
//!
//! The service only orchestrates these; identity verification, species
//! classification and image hosting are provided by third parties. Each
//! trait has a [`NotConfigured`] binding that answers with
//! `Error::Unavailable`, which handlers surface as 503.

use async_trait::async_trait;
use serde::Serialize;
use wildwatch_common::{Error, Result, SightingType};

/// Identity asserted by the provider for a sign-in token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserIdentity {
    pub email: String,
    pub name: String,
}

/// Species classification of a photograph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub sighting_type: SightingType,
    pub species: String,
    pub description: String,
}

/// Verifies a sign-in token with the identity provider
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    /// Returns `Error::Unauthorized` when the token is rejected
    async fn verify(&self, token: &str) -> Result<UserIdentity>;
}

/// Classifies the subject of a photograph
#[async_trait]
pub trait ImageClassifier: Send + Sync {
    async fn classify(&self, image: &[u8]) -> Result<Classification>;
}

/// Hosts an image and returns its public URL
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn upload(&self, image: &[u8]) -> Result<String>;
}

/// Placeholder for a collaborator that has not been wired up
#[derive(Debug, Clone, Copy, Default)]
pub struct NotConfigured;

#[async_trait]
impl IdentityVerifier for NotConfigured {
    async fn verify(&self, _token: &str) -> Result<UserIdentity> {
        Err(Error::Unavailable("identity provider is not configured".to_string()))
    }
}

#[async_trait]
impl ImageClassifier for NotConfigured {
    async fn classify(&self, _image: &[u8]) -> Result<Classification> {
        Err(Error::Unavailable("image classifier is not configured".to_string()))
    }
}

#[async_trait]
impl ImageStore for NotConfigured {
    async fn upload(&self, _image: &[u8]) -> Result<String> {
        Err(Error::Unavailable("image hosting is not configured".to_string()))
    }
}
