use super::trades_model::*;
use crate::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait defining the contract for Trade repository operations.
///
/// `record_trade` and `delete_trade` are the only inventory-mutating entry
/// points in the system: the repository applies the weighted-average-cost
/// ledger update and persists trade and position in a single transaction.
#[async_trait]
pub trait TradeRepositoryTrait: Send + Sync {
    fn get_trades(&self) -> Result<Vec<TradeWithItem>>;
    fn get_trades_by_name_id(&self, name_id: i64) -> Result<Vec<TradeWithItem>>;
    fn get_trades_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeWithItem>>;
    /// All trades in creation order, for ledger replay.
    fn get_trade_history(&self) -> Result<Vec<Trade>>;
    /// Persists the trade and the resulting inventory position atomically.
    /// Assigns the id and `created_at`, and derives `total_amount`.
    async fn record_trade(&self, new_trade: NewTrade) -> Result<Trade>;
    /// Deletes the trade and rolls its effect out of the inventory position
    /// atomically. Returns the deleted trade.
    async fn delete_trade(&self, trade_id: &str) -> Result<Trade>;
}

/// Trait defining the contract for Trade service operations.
#[async_trait]
pub trait TradeServiceTrait: Send + Sync {
    fn get_trades(&self) -> Result<Vec<TradeWithItem>>;
    fn get_trade_history(&self, name_id: i64) -> Result<Vec<TradeWithItem>>;
    fn get_trades_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeWithItem>>;
    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade>;
    async fn create_sell_trade(&self, request: SellRequest) -> Result<Trade>;
    async fn delete_trade(&self, trade_id: &str) -> Result<Trade>;
}
