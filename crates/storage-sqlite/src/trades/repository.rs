use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use skinfolio_core::inventory::ledger::{replay, PositionState};
use skinfolio_core::inventory::InventoryError;
use skinfolio_core::trades::{
    NewTrade, Trade, TradeError, TradeRepositoryTrait, TradeType, TradeWithItem,
};
use skinfolio_core::{Error, Result};

use super::model::TradeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::inventory::InventoryDB;
use crate::schema::{inventory, items, trades};
use crate::utils::format_timestamp;

/// Repository for trade records.
///
/// `record_trade` and `delete_trade` apply the weighted-average-cost ledger
/// functions from core inside the writer actor's transaction, so the trade
/// row and its inventory effect commit or roll back together. The stock
/// check against the position row read in the same transaction is the
/// authoritative one.
pub struct TradeRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TradeRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_position(
    conn: &mut SqliteConnection,
    name_id: i64,
) -> std::result::Result<Option<InventoryDB>, StorageError> {
    inventory::table
        .find(name_id)
        .select(InventoryDB::as_select())
        .first::<InventoryDB>(conn)
        .optional()
        .map_err(StorageError::from)
}

fn upsert_position(conn: &mut SqliteConnection, row: &InventoryDB) -> Result<()> {
    diesel::insert_into(inventory::table)
        .values(row)
        .on_conflict(inventory::name_id)
        .do_update()
        .set((
            inventory::current_quantity.eq(&row.current_quantity),
            inventory::weighted_average_cost.eq(&row.weighted_average_cost),
            inventory::total_investment_cost.eq(&row.total_investment_cost),
            inventory::last_updated_at.eq(&row.last_updated_at),
        ))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl TradeRepositoryTrait for TradeRepository {
    fn get_trades(&self) -> Result<Vec<TradeWithItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = trades::table
            .inner_join(items::table.on(items::name_id.eq(trades::name_id)))
            .select((TradeDB::as_select(), items::cn_name, items::en_name))
            .order(trades::created_at.desc())
            .load::<(TradeDB, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(db, cn_name, en_name)| db.into_trade_with_item(cn_name, en_name))
            .collect())
    }

    fn get_trades_by_name_id(&self, name_id: i64) -> Result<Vec<TradeWithItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = trades::table
            .inner_join(items::table.on(items::name_id.eq(trades::name_id)))
            .filter(trades::name_id.eq(name_id))
            .select((TradeDB::as_select(), items::cn_name, items::en_name))
            .order(trades::created_at.desc())
            .load::<(TradeDB, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(db, cn_name, en_name)| db.into_trade_with_item(cn_name, en_name))
            .collect())
    }

    fn get_trades_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeWithItem>> {
        let mut conn = get_connection(&self.pool)?;
        // Stored timestamps are fixed-width RFC3339, so string comparison
        // matches chronological order.
        let rows = trades::table
            .inner_join(items::table.on(items::name_id.eq(trades::name_id)))
            .filter(trades::created_at.ge(format_timestamp(start)))
            .filter(trades::created_at.lt(format_timestamp(end)))
            .select((TradeDB::as_select(), items::cn_name, items::en_name))
            .order(trades::created_at.asc())
            .load::<(TradeDB, String, String)>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows
            .into_iter()
            .map(|(db, cn_name, en_name)| db.into_trade_with_item(cn_name, en_name))
            .collect())
    }

    fn get_trade_history(&self) -> Result<Vec<Trade>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = trades::table
            .select(TradeDB::as_select())
            .order(trades::created_at.asc())
            .load::<TradeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Trade::from).collect())
    }

    async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        new_trade.validate().map_err(Error::from)?;
        let trade_row = TradeDB::new_row(&new_trade);

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let existing = load_position(conn, new_trade.name_id)?;
                let state = existing
                    .as_ref()
                    .map(InventoryDB::to_state)
                    .unwrap_or_default();

                let next_state = match new_trade.trade_type {
                    TradeType::Buy => state.apply_buy(new_trade.quantity, new_trade.unit_price),
                    TradeType::Sell => state
                        .apply_sell(new_trade.quantity, new_trade.unit_price)
                        .map_err(Error::from)?
                        .state,
                };

                let position_row = InventoryDB::from_state(
                    new_trade.name_id,
                    &next_state,
                    existing.map(|row| row.created_at),
                );
                upsert_position(conn, &position_row)?;

                let inserted = diesel::insert_into(trades::table)
                    .values(&trade_row)
                    .get_result::<TradeDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Trade::from(inserted))
            })
            .await
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<Trade> {
        let trade_id = trade_id.to_string();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Trade> {
                let trade_db = trades::table
                    .select(TradeDB::as_select())
                    .find(&trade_id)
                    .first::<TradeDB>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| Error::from(TradeError::NotFound(trade_id.clone())))?;
                let trade = Trade::from(trade_db);

                let existing = load_position(conn, trade.name_id)?.ok_or_else(|| {
                    Error::from(InventoryError::NotFound(trade.name_id))
                })?;
                let state = existing.to_state();

                // The item's remaining trades must still fold into a valid
                // position, or later stats replays would fail. A deletion
                // that strands a SELL without enough prior BUYs is rejected
                // even when the current quantity could absorb it.
                let remaining = trades::table
                    .filter(trades::name_id.eq(trade.name_id))
                    .filter(trades::id.ne(&trade.id))
                    .select(TradeDB::as_select())
                    .order(trades::created_at.asc())
                    .load::<TradeDB>(conn)
                    .map_err(StorageError::from)?
                    .into_iter()
                    .map(Trade::from)
                    .collect::<Vec<_>>();
                replay(remaining.iter()).map_err(|e| {
                    Error::from(TradeError::RollbackFailed {
                        trade_id: trade.id.clone(),
                        reason: e.to_string(),
                    })
                })?;

                let rolled_back: PositionState = match trade.trade_type {
                    TradeType::Buy => state
                        .rollback_buy(trade.quantity, trade.unit_price)
                        .map_err(|e| {
                            Error::from(TradeError::RollbackFailed {
                                trade_id: trade.id.clone(),
                                reason: e.to_string(),
                            })
                        })?,
                    TradeType::Sell => state.rollback_sell(trade.quantity),
                };

                let position_row = InventoryDB::from_state(
                    trade.name_id,
                    &rolled_back,
                    Some(existing.created_at),
                );
                upsert_position(conn, &position_row)?;

                diesel::delete(trades::table.find(&trade.id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(trade)
            })
            .await
    }
}
