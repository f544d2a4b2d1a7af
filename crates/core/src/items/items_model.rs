use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::serde_formats::timestamp_format;

/// A catalog entry for a tradable item.
///
/// `market_hash_name` and `name_id` are both unique; `name_id` is the
/// stable numeric key trades and positions reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub market_hash_name: String,
    pub en_name: String,
    pub cn_name: String,
    pub name_id: i64,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
}

/// Input payload for registering a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewItem {
    pub market_hash_name: String,
    pub en_name: String,
    pub cn_name: String,
    pub name_id: i64,
}

impl NewItem {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.market_hash_name.trim().is_empty() {
            return Err(ValidationError::MissingField(
                "marketHashName".to_string(),
            ));
        }
        if self.name_id <= 0 {
            return Err(ValidationError::InvalidInput(format!(
                "nameId must be positive, got {}",
                self.name_id
            )));
        }
        Ok(())
    }
}

/// One record of the bulk-import mapping, keyed externally by market hash name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemImportEntry {
    pub en_name: String,
    pub cn_name: String,
    pub name_id: i64,
}

/// Outcome of a bulk import run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub total_items: usize,
    pub imported_count: usize,
    pub skipped_count: usize,
    pub skipped_items: Vec<String>,
}
