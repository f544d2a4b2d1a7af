//! Inventory domain models.

use crate::utils::serde_formats::{decimal_format, timestamp_format};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-item inventory aggregate, upserted by trade processing.
///
/// A position is created on the item's first BUY and kept for the life of
/// the ledger; `current_quantity` may fall to zero but the record is never
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub name_id: i64,
    pub current_quantity: i32,
    #[serde(with = "decimal_format")]
    pub weighted_average_cost: Decimal,
    #[serde(with = "decimal_format")]
    pub total_investment_cost: Decimal,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp_format")]
    pub last_updated_at: DateTime<Utc>,
}

impl Position {
    /// Cost-basis value of the held quantity.
    pub fn cost_basis(&self) -> Decimal {
        self.weighted_average_cost * Decimal::from(self.current_quantity)
    }

    pub fn is_held(&self) -> bool {
        self.current_quantity > 0
    }
}

/// A position joined with its item's display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionWithItem {
    pub name_id: i64,
    pub cn_name: String,
    pub en_name: String,
    pub current_quantity: i32,
    #[serde(with = "decimal_format")]
    pub weighted_average_cost: Decimal,
    #[serde(with = "decimal_format")]
    pub total_investment_cost: Decimal,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp_format")]
    pub last_updated_at: DateTime<Utc>,
}
