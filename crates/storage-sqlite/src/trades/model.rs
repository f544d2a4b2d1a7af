//! Database models for trades.

use std::str::FromStr;

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use skinfolio_core::trades::{NewTrade, Trade, TradeType, TradeWithItem};

use crate::utils::{format_decimal, format_timestamp, parse_decimal, parse_timestamp};

/// Database model for trades
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TradeDB {
    pub id: String,
    pub name_id: i64,
    pub trade_type: String,
    pub unit_price: String,
    pub quantity: i32,
    pub total_amount: String,
    pub created_at: String,
}

fn parse_trade_type(value: &str) -> TradeType {
    TradeType::from_str(value).unwrap_or_else(|e| {
        // The CHECK constraint makes this unreachable for rows we wrote.
        log::error!("{}", e);
        TradeType::Buy
    })
}

impl From<TradeDB> for Trade {
    fn from(db: TradeDB) -> Self {
        Trade {
            name_id: db.name_id,
            trade_type: parse_trade_type(&db.trade_type),
            unit_price: parse_decimal(&db.unit_price, "trades.unit_price"),
            quantity: db.quantity,
            total_amount: parse_decimal(&db.total_amount, "trades.total_amount"),
            created_at: parse_timestamp(&db.created_at, "trades.created_at"),
            id: db.id,
        }
    }
}

impl TradeDB {
    /// Builds an insertable row, assigning the id and creation timestamp
    /// and deriving `total_amount` from the validated inputs.
    pub fn new_row(new_trade: &NewTrade) -> Self {
        TradeDB {
            id: uuid::Uuid::new_v4().to_string(),
            name_id: new_trade.name_id,
            trade_type: new_trade.trade_type.as_str().to_string(),
            unit_price: format_decimal(new_trade.unit_price),
            quantity: new_trade.quantity,
            total_amount: format_decimal(new_trade.total_amount()),
            created_at: format_timestamp(chrono::Utc::now()),
        }
    }

    pub fn into_trade_with_item(self, cn_name: String, en_name: String) -> TradeWithItem {
        let trade = Trade::from(self);
        TradeWithItem {
            id: trade.id,
            name_id: trade.name_id,
            cn_name,
            en_name,
            trade_type: trade.trade_type,
            unit_price: trade.unit_price,
            quantity: trade.quantity,
            total_amount: trade.total_amount,
            created_at: trade.created_at,
        }
    }
}
