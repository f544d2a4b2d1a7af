//! Parsing and formatting helpers for values stored as SQLite TEXT.

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a stored decimal string, falling back to zero on corruption
/// rather than failing the whole read.
pub fn parse_decimal(value: &str, field_name: &str) -> Decimal {
    match Decimal::from_str(value).or_else(|_| Decimal::from_scientific(value)) {
        Ok(d) => d,
        Err(e) => {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            Decimal::ZERO
        }
    }
}

/// Formats a timestamp for storage. Microsecond precision keeps the
/// strings fixed-width so lexicographic range filters match chronological
/// order.
pub fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Parses a stored timestamp, falling back to the Unix epoch on
/// corruption.
pub fn parse_timestamp(value: &str, field_name: &str) -> DateTime<Utc> {
    match DateTime::parse_from_rfc3339(value) {
        Ok(dt) => dt.with_timezone(&Utc),
        Err(e) => {
            log::error!("Failed to parse {} '{}': {}", field_name, value, e);
            Utc.timestamp_opt(0, 0).single().unwrap_or_default()
        }
    }
}

/// Formats a decimal for storage.
pub fn format_decimal(value: Decimal) -> String {
    value.to_string()
}
