use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::constants::{DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::items::items_errors::ImportError;
use crate::items::items_model::{ImportSummary, Item, ItemImportEntry, NewItem};
use crate::items::items_traits::{ItemRepositoryTrait, ItemServiceTrait};

/// Catalog lookups, search and bulk import.
pub struct ItemService {
    item_repository: Arc<dyn ItemRepositoryTrait>,
}

impl ItemService {
    pub fn new(item_repository: Arc<dyn ItemRepositoryTrait>) -> Self {
        Self { item_repository }
    }

    fn parse_import_payload(json_data: &str) -> Result<Vec<(String, ItemImportEntry)>> {
        let value: Value = serde_json::from_str(json_data)
            .map_err(|e| Error::Import(ImportError::Format(e.to_string())))?;
        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(Error::Import(ImportError::Format(format!(
                    "expected a JSON object keyed by market hash name, got {}",
                    type_name(&other)
                ))));
            }
        };
        if map.is_empty() {
            return Err(Error::Import(ImportError::EmptyPayload));
        }

        let mut entries = Vec::with_capacity(map.len());
        for (market_hash_name, entry) in map {
            let entry: ItemImportEntry = serde_json::from_value(entry).map_err(|e| {
                Error::Import(ImportError::Format(format!(
                    "record for '{}' is malformed: {}",
                    market_hash_name, e
                )))
            })?;
            entries.push((market_hash_name, entry));
        }
        Ok(entries)
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl ItemServiceTrait for ItemService {
    fn get_items(&self) -> Result<Vec<Item>> {
        self.item_repository.get_items()
    }

    fn get_item_by_name_id(&self, name_id: i64) -> Result<Item> {
        self.item_repository
            .find_by_name_id(name_id)?
            .ok_or_else(|| {
                Error::Database(DatabaseError::NotFound(format!(
                    "Item not found for nameId {}",
                    name_id
                )))
            })
    }

    fn search_items(&self, keyword: &str, limit: Option<i64>) -> Result<Vec<Item>> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Ok(Vec::new());
        }
        let limit = limit
            .unwrap_or(DEFAULT_SEARCH_LIMIT)
            .clamp(1, MAX_SEARCH_LIMIT);
        self.item_repository.search_items(keyword, limit)
    }

    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        new_item.validate()?;
        if self
            .item_repository
            .find_by_market_hash_name(&new_item.market_hash_name)?
            .is_some()
        {
            return Err(ValidationError::InvalidInput(format!(
                "Item '{}' already exists",
                new_item.market_hash_name
            ))
            .into());
        }
        self.item_repository.create_item(new_item).await
    }

    async fn import_items(&self, json_data: &str) -> Result<ImportSummary> {
        let entries = Self::parse_import_payload(json_data)?;

        let mut summary = ImportSummary {
            total_items: entries.len(),
            ..Default::default()
        };

        for (market_hash_name, entry) in entries {
            let new_item = NewItem {
                market_hash_name: market_hash_name.clone(),
                en_name: entry.en_name,
                cn_name: entry.cn_name,
                name_id: entry.name_id,
            };
            if new_item.validate().is_err() {
                summary.skipped_count += 1;
                summary.skipped_items.push(market_hash_name);
                continue;
            }
            if self.item_repository.insert_if_absent(new_item).await? {
                summary.imported_count += 1;
            } else {
                summary.skipped_count += 1;
                summary.skipped_items.push(market_hash_name);
            }
            if (summary.imported_count + summary.skipped_count) % 500 == 0 {
                log::debug!(
                    "Import progress: {}/{} processed",
                    summary.imported_count + summary.skipped_count,
                    summary.total_items
                );
            }
        }

        log::info!(
            "Item import finished: {} imported, {} skipped of {}",
            summary.imported_count,
            summary.skipped_count,
            summary.total_items
        );
        Ok(summary)
    }
}
