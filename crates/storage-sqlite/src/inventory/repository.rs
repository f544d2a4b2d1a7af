use std::sync::Arc;

use diesel::prelude::*;

use skinfolio_core::inventory::{InventoryRepositoryTrait, Position, PositionWithItem};
use skinfolio_core::Result;

use super::model::{with_item, InventoryDB};
use crate::db::{get_connection, DbPool};
use crate::errors::StorageError;
use crate::schema::{inventory, items};

/// Read-side repository for inventory positions. All mutations happen in
/// the trade repository's write transactions.
pub struct InventoryRepository {
    pool: Arc<DbPool>,
}

impl InventoryRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

impl InventoryRepositoryTrait for InventoryRepository {
    fn get_positions(&self) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = inventory::table
            .select(InventoryDB::as_select())
            .order(inventory::name_id.asc())
            .load::<InventoryDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Position::from).collect())
    }

    fn get_positions_with_item(&self) -> Result<Vec<PositionWithItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = inventory::table
            .inner_join(items::table.on(items::name_id.eq(inventory::name_id)))
            .select((InventoryDB::as_select(), items::cn_name, items::en_name))
            .order(inventory::last_updated_at.desc())
            .load::<(InventoryDB, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(db, cn_name, en_name)| with_item(db, cn_name, en_name))
            .collect())
    }

    fn get_position(&self, name_id: i64) -> Result<Option<Position>> {
        let mut conn = get_connection(&self.pool)?;
        let row = inventory::table
            .select(InventoryDB::as_select())
            .find(name_id)
            .first::<InventoryDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Position::from))
    }

    fn get_position_with_item(&self, name_id: i64) -> Result<Option<PositionWithItem>> {
        let mut conn = get_connection(&self.pool)?;
        let row = inventory::table
            .inner_join(items::table.on(items::name_id.eq(inventory::name_id)))
            .filter(inventory::name_id.eq(name_id))
            .select((InventoryDB::as_select(), items::cn_name, items::en_name))
            .first::<(InventoryDB, String, String)>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(|(db, cn_name, en_name)| with_item(db, cn_name, en_name)))
    }
}
