//! Sign-in sessions

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::Result;

/// Issue a new opaque session token for an existing user
pub async fn create_session(pool: &SqlitePool, email: &str) -> Result<String> {
    let token = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (token, email, created_at) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(email)
        .bind(crate::time::now())
        .execute(pool)
        .await?;

    Ok(token)
}
