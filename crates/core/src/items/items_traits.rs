use async_trait::async_trait;

use crate::errors::Result;
use crate::items::items_model::{ImportSummary, Item, NewItem};

/// Data access for the item catalog.
#[async_trait]
pub trait ItemRepositoryTrait: Send + Sync {
    fn get_items(&self) -> Result<Vec<Item>>;
    fn find_by_name_id(&self, name_id: i64) -> Result<Option<Item>>;
    fn find_by_market_hash_name(&self, market_hash_name: &str) -> Result<Option<Item>>;
    /// Case-insensitive substring search over all three names.
    fn search_items(&self, keyword: &str, limit: i64) -> Result<Vec<Item>>;
    async fn create_item(&self, new_item: NewItem) -> Result<Item>;
    /// Inserts the item unless one with the same `market_hash_name` or
    /// `name_id` already exists. Returns whether a row was inserted.
    async fn insert_if_absent(&self, new_item: NewItem) -> Result<bool>;
}

#[async_trait]
pub trait ItemServiceTrait: Send + Sync {
    fn get_items(&self) -> Result<Vec<Item>>;
    fn get_item_by_name_id(&self, name_id: i64) -> Result<Item>;
    fn search_items(&self, keyword: &str, limit: Option<i64>) -> Result<Vec<Item>>;
    async fn create_item(&self, new_item: NewItem) -> Result<Item>;
    /// Parses a JSON object mapping market hash name to item records and
    /// registers every entry not already present.
    async fn import_items(&self, json_data: &str) -> Result<ImportSummary>;
}
