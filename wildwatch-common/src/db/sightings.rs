//! Sighting persistence
//!
//! Handlers depend on the [`SightingStore`] trait so the aggregation path can
//! be exercised against any candidate source. [`SqliteSightingStore`] is the
//! production binding.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::warn;
use uuid::Uuid;

use super::users;
use crate::models::{NewSighting, Sighting, SightingType};
use crate::{Error, Result};

/// List-retrieval capability over recorded sightings
///
/// Implementations return sightings in natural storage order (oldest first).
/// Aggregation is first-seen-wins, so this order is observable by clients.
#[async_trait]
pub trait SightingStore: Send + Sync {
    /// All sightings whose type equals `sighting_type`
    async fn find_by_type(&self, sighting_type: SightingType) -> Result<Vec<Sighting>>;

    /// Every stored sighting
    async fn list_all(&self) -> Result<Vec<Sighting>>;

    /// Persist a new sighting, assigning its id and creation time, and credit
    /// the reporter's contribution count
    ///
    /// Both writes succeed together or not at all.
    async fn insert(&self, sighting: NewSighting) -> Result<Sighting>;
}

/// SQLite-backed sighting store
#[derive(Clone)]
pub struct SqliteSightingStore {
    pool: SqlitePool,
}

impl SqliteSightingStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str =
    "SELECT id, latitude, longitude, image, type, species, description, email, created_at FROM sightings";

fn row_to_sighting(row: &SqliteRow) -> Result<Sighting> {
    let type_text: String = row.try_get("type")?;
    let sighting_type = type_text
        .parse::<SightingType>()
        .map_err(|_| Error::Internal(format!("Stored sighting has unknown type: {}", type_text)))?;

    Ok(Sighting {
        id: row.try_get("id")?,
        latitude: row.try_get("latitude")?,
        longitude: row.try_get("longitude")?,
        image: row.try_get("image")?,
        sighting_type,
        species: row.try_get("species")?,
        description: row.try_get("description")?,
        email: row.try_get("email")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

/// Decode rows, dropping (and logging) any that cannot be read
fn decode_rows(rows: &[SqliteRow]) -> Vec<Sighting> {
    rows.iter()
        .filter_map(|row| match row_to_sighting(row) {
            Ok(sighting) => Some(sighting),
            Err(e) => {
                warn!("Skipping unreadable sighting row: {}", e);
                None
            }
        })
        .collect()
}

#[async_trait]
impl SightingStore for SqliteSightingStore {
    async fn find_by_type(&self, sighting_type: SightingType) -> Result<Vec<Sighting>> {
        let rows = sqlx::query(&format!("{} WHERE type = ? ORDER BY rowid ASC", SELECT_COLUMNS))
            .bind(sighting_type.as_str())
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn list_all(&self) -> Result<Vec<Sighting>> {
        let rows = sqlx::query(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS))
            .fetch_all(&self.pool)
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn insert(&self, new: NewSighting) -> Result<Sighting> {
        new.validate()?;

        let sighting = Sighting {
            id: Uuid::new_v4().to_string(),
            latitude: new.latitude,
            longitude: new.longitude,
            image: new.image,
            sighting_type: new.sighting_type,
            species: new.species,
            description: new.description,
            email: new.email,
            created_at: crate::time::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sightings (id, latitude, longitude, image, type, species, description, email, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&sighting.id)
        .bind(&sighting.latitude)
        .bind(&sighting.longitude)
        .bind(&sighting.image)
        .bind(sighting.sighting_type.as_str())
        .bind(&sighting.species)
        .bind(&sighting.description)
        .bind(&sighting.email)
        .bind(sighting.created_at)
        .execute(&mut *tx)
        .await?;

        // Dropping `tx` on error rolls the sighting back
        users::record_contribution(&mut *tx, &sighting.email).await?;

        tx.commit().await?;

        Ok(sighting)
    }
}
