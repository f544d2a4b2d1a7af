use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::debug;
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::inventory::InventoryRepositoryTrait;
use crate::stats::daily_flow::aggregate_daily_flows;
use crate::stats::pool_calculator::compute_pool_summary;
use crate::stats::stats_model::{DailyFlow, PoolSummary};
use crate::stats::stats_traits::StatsServiceTrait;
use crate::trades::TradeRepositoryTrait;

/// Service composing the pure stats calculators with the repositories.
pub struct StatsService {
    trade_repository: Arc<dyn TradeRepositoryTrait>,
    inventory_repository: Arc<dyn InventoryRepositoryTrait>,
}

impl StatsService {
    pub fn new(
        trade_repository: Arc<dyn TradeRepositoryTrait>,
        inventory_repository: Arc<dyn InventoryRepositoryTrait>,
    ) -> Self {
        Self {
            trade_repository,
            inventory_repository,
        }
    }
}

impl StatsServiceTrait for StatsService {
    fn get_daily_flows(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DailyFlow>> {
        if start > end {
            return Err(ValidationError::InvalidDateRange {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            }
            .into());
        }
        let trades = self.trade_repository.get_trades_in_range(start, end)?;
        debug!(
            "Aggregating daily flows over {} trades in [{}, {})",
            trades.len(),
            start.to_rfc3339(),
            end.to_rfc3339()
        );
        aggregate_daily_flows(&trades, start, end)
    }

    fn get_pool_summary(&self, manual_value: Option<Decimal>) -> Result<PoolSummary> {
        let trades = self.trade_repository.get_trade_history()?;
        let positions = self.inventory_repository.get_positions()?;
        compute_pool_summary(&trades, &positions, manual_value)
    }
}
