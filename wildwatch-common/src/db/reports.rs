//! Location reports

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::Report;
use crate::Result;

/// Store a report and return it with its assigned id and timestamp
pub async fn insert_report(
    pool: &SqlitePool,
    report_type: &str,
    latitude: f64,
    longitude: f64,
    email: &str,
) -> Result<Report> {
    let report = Report {
        id: Uuid::new_v4().to_string(),
        report_type: report_type.to_string(),
        latitude,
        longitude,
        email: email.to_string(),
        created_at: crate::time::now(),
    };

    sqlx::query(
        "INSERT INTO reports (id, report_type, latitude, longitude, email, created_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&report.id)
    .bind(&report.report_type)
    .bind(report.latitude)
    .bind(report.longitude)
    .bind(&report.email)
    .bind(report.created_at)
    .execute(pool)
    .await?;

    Ok(report)
}
