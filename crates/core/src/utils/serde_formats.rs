//! Shared serde helpers for monetary and timestamp fields.
//!
//! Monetary values cross the JSON boundary as exact decimal strings, never
//! as binary floating point. Deserialization also accepts bare numbers for
//! tolerance with hand-written payloads.

/// Serializes a required `Decimal` as a string; accepts strings or numbers
/// on the way in.
pub mod decimal_format {
    use rust_decimal::Decimal;
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // Normalized so the wire form does not depend on how a value was
        // computed (3 rather than 3.0000).
        serializer.serialize_str(&value.normalize().to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalInput {
            String(String),
            Number(serde_json::Number),
        }

        match DecimalInput::deserialize(deserializer)? {
            DecimalInput::String(s) => {
                let trimmed = s.trim();
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map_err(|e| {
                        serde::de::Error::custom(format!("Invalid decimal value '{}': {}", s, e))
                    })
            }
            DecimalInput::Number(n) => Decimal::from_str(&n.to_string()).map_err(|e| {
                serde::de::Error::custom(format!("Invalid decimal value '{}': {}", n, e))
            }),
        }
    }
}

/// Serializes an `Option<Decimal>` as a string or null.
pub mod optional_decimal_format {
    use rust_decimal::Decimal;
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::str::FromStr;

    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(d) => serializer.serialize_str(&d.normalize().to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum DecimalInput {
            String(String),
            Number(serde_json::Number),
            Null,
        }

        match Option::<DecimalInput>::deserialize(deserializer)? {
            None | Some(DecimalInput::Null) => Ok(None),
            Some(DecimalInput::String(s)) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                Decimal::from_str(trimmed)
                    .or_else(|_| Decimal::from_scientific(trimmed))
                    .map(Some)
                    .map_err(|e| {
                        serde::de::Error::custom(format!("Invalid decimal value '{}': {}", s, e))
                    })
            }
            Some(DecimalInput::Number(n)) => Decimal::from_str(&n.to_string())
                .map(Some)
                .map_err(|e| {
                    serde::de::Error::custom(format!("Invalid decimal value '{}': {}", n, e))
                }),
        }
    }
}

/// Serializes timestamps as RFC3339 strings in UTC.
pub mod timestamp_format {
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Ok(dt.with_timezone(&Utc));
        }

        // Date-only values are taken as midnight UTC
        if let Ok(date) = NaiveDate::parse_from_str(&s, "%Y-%m-%d") {
            return Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default()));
        }

        Err(serde::de::Error::custom(format!(
            "Invalid timestamp format: {}. Expected ISO 8601/RFC3339 or YYYY-MM-DD",
            s
        )))
    }
}
