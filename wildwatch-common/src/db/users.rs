//! User accounts keyed by email

use sqlx::sqlite::SqliteExecutor;
use sqlx::SqlitePool;

use crate::models::User;
use crate::Result;

/// Create the user on first sign-in, or refresh the display name
pub async fn upsert_user(pool: &SqlitePool, email: &str, name: &str) -> Result<User> {
    sqlx::query(
        "INSERT INTO users (email, name) VALUES (?, ?)
         ON CONFLICT(email) DO UPDATE SET name = excluded.name",
    )
    .bind(email)
    .bind(name)
    .execute(pool)
    .await?;

    get_user(pool, email)
        .await?
        .ok_or_else(|| crate::Error::Internal(format!("User vanished after upsert: {}", email)))
}

/// Look up a user by email
pub async fn get_user(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let record = sqlx::query_as::<_, (String, String, i64)>(
        "SELECT email, name, contribution_number FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(record.map(|(email, name, contribution_number)| User {
        email,
        name,
        contribution_number,
    }))
}

/// Count one more uploaded sighting for `email`
///
/// Reporters who never signed in get an account named after their email.
/// Accepts a pool or an open transaction.
pub async fn record_contribution<'e, E>(executor: E, email: &str) -> Result<()>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        "INSERT INTO users (email, name, contribution_number) VALUES (?, ?, 1)
         ON CONFLICT(email) DO UPDATE SET contribution_number = contribution_number + 1",
    )
    .bind(email)
    .bind(email)
    .execute(executor)
    .await?;

    Ok(())
}
