//! Timestamp utilities

use chrono::{DateTime, Utc};
use serde::Serializer;

/// Layout used for timestamps shown to clients (UTC, no zone suffix)
pub const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Render a timestamp as `YYYY-MM-DD HH:MM:SS`
pub fn format_display(timestamp: &DateTime<Utc>) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// serde `serialize_with` adapter for [`format_display`]
pub fn serialize_display<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_display(timestamp))
}
