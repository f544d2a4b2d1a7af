use chrono::{DateTime, Utc};
use log::debug;
use std::sync::Arc;

use crate::errors::ValidationError;
use crate::inventory::InventoryError;
use crate::inventory::InventoryServiceTrait;
use crate::items::ItemRepositoryTrait;
use crate::trades::trades_errors::TradeError;
use crate::trades::trades_model::*;
use crate::trades::{TradeRepositoryTrait, TradeServiceTrait};
use crate::Result;
use async_trait::async_trait;

/// Service for the trade workflow.
///
/// Validates inputs and pre-checks stock before handing the mutation to the
/// repository, which applies the ledger update and persists atomically.
pub struct TradeService {
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    item_repository: Arc<dyn ItemRepositoryTrait>,
    inventory_service: Arc<dyn InventoryServiceTrait>,
}

impl TradeService {
    /// Creates a new TradeService instance with injected dependencies
    pub fn new(
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        item_repository: Arc<dyn ItemRepositoryTrait>,
        inventory_service: Arc<dyn InventoryServiceTrait>,
    ) -> Self {
        Self {
            trade_repository,
            item_repository,
            inventory_service,
        }
    }

    fn ensure_item_registered(&self, name_id: i64) -> Result<()> {
        if self.item_repository.find_by_name_id(name_id)?.is_none() {
            return Err(TradeError::UnknownItem(name_id).into());
        }
        Ok(())
    }
}

#[async_trait]
impl TradeServiceTrait for TradeService {
    fn get_trades(&self) -> Result<Vec<TradeWithItem>> {
        self.trade_repository.get_trades()
    }

    fn get_trade_history(&self, name_id: i64) -> Result<Vec<TradeWithItem>> {
        self.trade_repository.get_trades_by_name_id(name_id)
    }

    fn get_trades_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TradeWithItem>> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            }
            .into());
        }
        self.trade_repository.get_trades_in_range(start, end)
    }

    async fn create_trade(&self, new_trade: NewTrade) -> Result<Trade> {
        new_trade.validate()?;
        self.ensure_item_registered(new_trade.name_id)?;

        // Fast-fail on obvious oversells; the repository re-checks inside
        // the write transaction, which remains the authoritative check.
        if new_trade.trade_type == TradeType::Sell {
            let held = self
                .inventory_service
                .get_current_quantity(new_trade.name_id)?;
            if held < new_trade.quantity {
                return Err(InventoryError::InsufficientStock {
                    held,
                    requested: new_trade.quantity,
                }
                .into());
            }
        }

        debug!(
            "Recording {} trade: nameId={}, quantity={}, unitPrice={}",
            new_trade.trade_type, new_trade.name_id, new_trade.quantity, new_trade.unit_price
        );
        self.trade_repository.record_trade(new_trade).await
    }

    async fn create_sell_trade(&self, request: SellRequest) -> Result<Trade> {
        self.create_trade(request.into()).await
    }

    async fn delete_trade(&self, trade_id: &str) -> Result<Trade> {
        if trade_id.trim().is_empty() {
            return Err(TradeError::InvalidParameters(
                "Trade ID is required for deletion".to_string(),
            )
            .into());
        }
        self.trade_repository.delete_trade(trade_id).await
    }
}
