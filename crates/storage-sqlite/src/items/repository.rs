use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use skinfolio_core::items::{Item, ItemRepositoryTrait, NewItem};
use skinfolio_core::Result;

use super::model::ItemDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::items;

/// Repository for the item catalog.
pub struct ItemRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ItemRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    fn get_items(&self) -> Result<Vec<Item>> {
        let mut conn = get_connection(&self.pool)?;
        let items_db = items::table
            .select(ItemDB::as_select())
            .order(items::created_at.asc())
            .load::<ItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(items_db.into_iter().map(Item::from).collect())
    }

    fn find_by_name_id(&self, name_id: i64) -> Result<Option<Item>> {
        let mut conn = get_connection(&self.pool)?;
        let item_db = items::table
            .select(ItemDB::as_select())
            .filter(items::name_id.eq(name_id))
            .first::<ItemDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(item_db.map(Item::from))
    }

    fn find_by_market_hash_name(&self, market_hash_name: &str) -> Result<Option<Item>> {
        let mut conn = get_connection(&self.pool)?;
        let item_db = items::table
            .select(ItemDB::as_select())
            .filter(items::market_hash_name.eq(market_hash_name))
            .first::<ItemDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(item_db.map(Item::from))
    }

    fn search_items(&self, keyword: &str, limit: i64) -> Result<Vec<Item>> {
        let mut conn = get_connection(&self.pool)?;
        // SQLite LIKE is already case-insensitive for ASCII.
        let pattern = format!("%{}%", keyword);
        let items_db = items::table
            .select(ItemDB::as_select())
            .filter(
                items::market_hash_name
                    .like(pattern.clone())
                    .or(items::en_name.like(pattern.clone()))
                    .or(items::cn_name.like(pattern)),
            )
            .order(items::market_hash_name.asc())
            .limit(limit)
            .load::<ItemDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(items_db.into_iter().map(Item::from).collect())
    }

    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        let row = ItemDB::new_row(new_item);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Item> {
                let inserted = diesel::insert_into(items::table)
                    .values(&row)
                    .get_result::<ItemDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Item::from(inserted))
            })
            .await
    }

    async fn insert_if_absent(&self, new_item: NewItem) -> Result<bool> {
        let row = ItemDB::new_row(new_item);
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<bool> {
                let existing: i64 = items::table
                    .filter(
                        items::market_hash_name
                            .eq(&row.market_hash_name)
                            .or(items::name_id.eq(row.name_id)),
                    )
                    .count()
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                if existing > 0 {
                    return Ok(false);
                }
                diesel::insert_into(items::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(true)
            })
            .await
    }
}
