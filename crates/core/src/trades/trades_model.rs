//! Trade domain models.

use crate::constants::PRICE_DECIMAL_PRECISION;
use crate::trades::trades_constants::{TRADE_TYPE_BUY, TRADE_TYPE_SELL};
use crate::trades::trades_errors::TradeError;
use crate::utils::serde_formats::{decimal_format, timestamp_format};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Direction of a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl TradeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeType::Buy => TRADE_TYPE_BUY,
            TradeType::Sell => TRADE_TYPE_SELL,
        }
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, TradeType::Buy)
    }
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            TRADE_TYPE_BUY => Ok(TradeType::Buy),
            TRADE_TYPE_SELL => Ok(TradeType::Sell),
            _ => Err(format!("Unknown trade type: {}", s)),
        }
    }
}

/// An immutable trade fact: one BUY or SELL of a single item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub name_id: i64,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(with = "decimal_format")]
    pub unit_price: Decimal,
    pub quantity: i32,
    /// Derived as `unit_price * quantity` at persistence time; the value a
    /// client sends is never trusted.
    #[serde(with = "decimal_format")]
    pub total_amount: Decimal,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
}

impl Trade {
    pub fn quantity_dec(&self) -> Decimal {
        Decimal::from(self.quantity)
    }
}

/// A trade joined with its item's display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeWithItem {
    pub id: String,
    pub name_id: i64,
    pub cn_name: String,
    pub en_name: String,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(with = "decimal_format")]
    pub unit_price: Decimal,
    pub quantity: i32,
    #[serde(with = "decimal_format")]
    pub total_amount: Decimal,
    #[serde(with = "timestamp_format")]
    pub created_at: DateTime<Utc>,
}

/// Input model for creating a new trade.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrade {
    pub name_id: i64,
    #[serde(rename = "type")]
    pub trade_type: TradeType,
    #[serde(with = "decimal_format")]
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl NewTrade {
    /// Validates the trade parameters.
    ///
    /// Prices carry at most four fractional digits; quantities are whole
    /// positive item counts.
    pub fn validate(&self) -> std::result::Result<(), TradeError> {
        if self.quantity <= 0 {
            return Err(TradeError::InvalidParameters(format!(
                "Quantity must be positive, got {}",
                self.quantity
            )));
        }
        if self.unit_price.is_sign_negative() {
            return Err(TradeError::InvalidParameters(format!(
                "Unit price must not be negative, got {}",
                self.unit_price
            )));
        }
        if self.unit_price.scale() > PRICE_DECIMAL_PRECISION {
            return Err(TradeError::InvalidParameters(format!(
                "Unit price supports at most {} fractional digits, got {}",
                PRICE_DECIMAL_PRECISION, self.unit_price
            )));
        }
        Ok(())
    }

    /// The amount of money this trade moves.
    pub fn total_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Request to sell out of inventory, always a SELL.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellRequest {
    pub name_id: i64,
    #[serde(with = "decimal_format")]
    pub unit_price: Decimal,
    pub quantity: i32,
}

impl From<SellRequest> for NewTrade {
    fn from(req: SellRequest) -> Self {
        NewTrade {
            name_id: req.name_id,
            trade_type: TradeType::Sell,
            unit_price: req.unit_price,
            quantity: req.quantity,
        }
    }
}
