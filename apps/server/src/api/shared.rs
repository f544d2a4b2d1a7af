use chrono::{DateTime, Utc};

use crate::error::ApiError;

/// Parses a required RFC3339 instant from a query parameter.
pub fn parse_instant(value: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ApiError::BadRequest(format!(
                "Invalid {} '{}': {} (expected RFC3339)",
                field, value, e
            ))
        })
}
