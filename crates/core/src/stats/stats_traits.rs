use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::Result;
use crate::stats::stats_model::{DailyFlow, PoolSummary};

/// Portfolio-wide statistics over the trade book.
pub trait StatsServiceTrait: Send + Sync {
    /// Daily buy/sell/net flows over the half-open range `[start, end)`.
    fn get_daily_flows(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<DailyFlow>>;
    /// Pool summary, optionally valuing current holdings at `manual_value`
    /// instead of cost basis.
    fn get_pool_summary(&self, manual_value: Option<Decimal>) -> Result<PoolSummary>;
}
