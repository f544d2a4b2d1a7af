use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::serde_formats::decimal_format;

/// Money moved on one UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyFlow {
    pub day: NaiveDate,
    #[serde(with = "decimal_format")]
    pub total_buy: Decimal,
    #[serde(with = "decimal_format")]
    pub total_sell: Decimal,
    /// `total_sell - total_buy`.
    #[serde(with = "decimal_format")]
    pub net: Decimal,
}

/// The whole trade book viewed as one investment pool.
///
/// `peak_net_investment` is the high-water mark of cumulative buys minus
/// cumulative sells over the trade history in creation order; it stands in
/// for the principal actually put at risk, so `real_return_rate` does not
/// double-count reinvested proceeds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolSummary {
    #[serde(with = "decimal_format")]
    pub total_investment: Decimal,
    #[serde(with = "decimal_format")]
    pub total_withdrawal: Decimal,
    #[serde(with = "decimal_format")]
    pub peak_net_investment: Decimal,
    /// Cost basis of what is currently held, `sum(WAC * quantity)`.
    #[serde(with = "decimal_format")]
    pub current_cost_basis: Decimal,
    /// Cost basis, or the caller-supplied manual market valuation.
    #[serde(with = "decimal_format")]
    pub current_holding_value: Decimal,
    #[serde(with = "decimal_format")]
    pub realized_profit: Decimal,
    #[serde(with = "decimal_format")]
    pub unrealized_profit: Decimal,
    #[serde(with = "decimal_format")]
    pub total_profit: Decimal,
    /// `total_profit / peak_net_investment`, rounded to four fractional
    /// digits half-up; zero when the peak is zero.
    #[serde(with = "decimal_format")]
    pub real_return_rate: Decimal,
    pub first_investment_date: Option<NaiveDate>,
    pub last_trade_date: Option<NaiveDate>,
    /// Inclusive day span from the first BUY to the last trade.
    pub total_investment_days: i64,
    pub total_buy_trades: usize,
    pub total_sell_trades: usize,
    /// Distinct items ever traded.
    pub total_items: usize,
    /// Items currently held with a positive quantity.
    pub current_holding_items: usize,
}
