//! Timestamp helpers shared by storage backends.
//!
//! Timestamps are UTC with microsecond precision and stored as fixed-width
//! text (`2025-01-01T00:00:00.000000Z`), so text order equals time order and
//! format -> parse -> format is lossless.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::db::{DbError, DbResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6fZ";

/// Current time, truncated to the stored precision.
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp. RFC 3339 values are accepted too.
pub fn parse_timestamp(value: &str) -> DbResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.fZ")
        .map(|naive| naive.and_utc())
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|dt| dt.with_timezone(&Utc)))
        .map_err(|e| DbError::CorruptRow {
            message: format!("invalid timestamp '{}': {}", value, e),
        })
}
