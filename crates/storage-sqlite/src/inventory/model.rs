//! Database models for inventory positions.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use skinfolio_core::inventory::ledger::PositionState;
use skinfolio_core::inventory::{Position, PositionWithItem};

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};

/// Database model for inventory positions
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::inventory)]
#[diesel(primary_key(name_id))]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InventoryDB {
    pub name_id: i64,
    pub current_quantity: i32,
    pub weighted_average_cost: String,
    pub total_investment_cost: String,
    pub created_at: String,
    pub last_updated_at: String,
}

impl InventoryDB {
    /// Extracts the arithmetic state the ledger functions operate on.
    pub fn to_state(&self) -> PositionState {
        PositionState {
            quantity: self.current_quantity,
            weighted_average_cost: parse_decimal(
                &self.weighted_average_cost,
                "inventory.weighted_average_cost",
            ),
            total_investment_cost: parse_decimal(
                &self.total_investment_cost,
                "inventory.total_investment_cost",
            ),
        }
    }

    /// A row reflecting `state`, preserving `created_at` when updating an
    /// existing row.
    pub fn from_state(name_id: i64, state: &PositionState, created_at: Option<String>) -> Self {
        let now = format_timestamp(chrono::Utc::now());
        InventoryDB {
            name_id,
            current_quantity: state.quantity,
            weighted_average_cost: format_decimal(state.weighted_average_cost),
            total_investment_cost: format_decimal(state.total_investment_cost),
            created_at: created_at.unwrap_or_else(|| now.clone()),
            last_updated_at: now,
        }
    }
}

impl From<InventoryDB> for Position {
    fn from(db: InventoryDB) -> Self {
        Position {
            name_id: db.name_id,
            current_quantity: db.current_quantity,
            weighted_average_cost: parse_decimal(
                &db.weighted_average_cost,
                "inventory.weighted_average_cost",
            ),
            total_investment_cost: parse_decimal(
                &db.total_investment_cost,
                "inventory.total_investment_cost",
            ),
            created_at: parse_timestamp(&db.created_at, "inventory.created_at"),
            last_updated_at: parse_timestamp(&db.last_updated_at, "inventory.last_updated_at"),
        }
    }
}

/// Joins a position row with its item's display names.
pub fn with_item(db: InventoryDB, cn_name: String, en_name: String) -> PositionWithItem {
    let position = Position::from(db);
    PositionWithItem {
        name_id: position.name_id,
        cn_name,
        en_name,
        current_quantity: position.current_quantity,
        weighted_average_cost: position.weighted_average_cost,
        total_investment_cost: position.total_investment_cost,
        created_at: position.created_at,
        last_updated_at: position.last_updated_at,
    }
}
