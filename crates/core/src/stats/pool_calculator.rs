use std::collections::{HashMap, HashSet};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::PRICE_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::inventory::ledger::PositionState;
use crate::inventory::Position;
use crate::stats::stats_model::PoolSummary;
use crate::trades::Trade;

/// Computes the investment-pool summary from the full trade history and the
/// stored positions.
///
/// `trades` must be in creation order; the peak-net-investment fold and the
/// per-item ledger replay both depend on it. `manual_value`, when given,
/// replaces the cost-basis valuation of the current holdings. Pure and
/// idempotent; an empty history yields an all-zero summary.
pub fn compute_pool_summary(
    trades: &[Trade],
    positions: &[Position],
    manual_value: Option<Decimal>,
) -> Result<PoolSummary> {
    if trades.is_empty() {
        return Ok(PoolSummary::default());
    }

    let mut total_investment = Decimal::ZERO;
    let mut total_withdrawal = Decimal::ZERO;
    let mut net_investment = Decimal::ZERO;
    let mut peak_net_investment = Decimal::ZERO;
    let mut realized_profit = Decimal::ZERO;
    let mut total_buy_trades = 0usize;
    let mut total_sell_trades = 0usize;
    let mut first_investment_date = None;
    let mut last_trade_date = None;
    let mut traded_items: HashSet<i64> = HashSet::new();
    let mut states: HashMap<i64, PositionState> = HashMap::new();

    for trade in trades {
        let day = trade.created_at.date_naive();
        last_trade_date = Some(last_trade_date.map_or(day, |d: chrono::NaiveDate| d.max(day)));
        traded_items.insert(trade.name_id);

        if trade.trade_type.is_buy() {
            total_buy_trades += 1;
            total_investment += trade.total_amount;
            net_investment += trade.total_amount;
            first_investment_date =
                Some(first_investment_date.map_or(day, |d: chrono::NaiveDate| d.min(day)));
        } else {
            total_sell_trades += 1;
            total_withdrawal += trade.total_amount;
            net_investment -= trade.total_amount;
        }
        if net_investment > peak_net_investment {
            peak_net_investment = net_investment;
        }

        let state = states.entry(trade.name_id).or_default();
        let entry = state.apply(trade)?;
        realized_profit += entry.realized_profit;
        *state = entry.state;
    }

    let current_cost_basis: Decimal = positions
        .iter()
        .filter(|p| p.current_quantity > 0)
        .map(Position::cost_basis)
        .sum();
    let current_holding_value = manual_value.unwrap_or(current_cost_basis);
    let unrealized_profit = current_holding_value - current_cost_basis;
    let total_profit = realized_profit + unrealized_profit;

    let real_return_rate = if peak_net_investment > Decimal::ZERO {
        (total_profit / peak_net_investment)
            .round_dp_with_strategy(PRICE_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
    } else {
        Decimal::ZERO
    };

    let total_investment_days = match (first_investment_date, last_trade_date) {
        (Some(first), Some(last)) => (last - first).num_days() + 1,
        _ => 0,
    };

    Ok(PoolSummary {
        total_investment,
        total_withdrawal,
        peak_net_investment,
        current_cost_basis,
        current_holding_value,
        realized_profit,
        unrealized_profit,
        total_profit,
        real_return_rate,
        first_investment_date,
        last_trade_date,
        total_investment_days,
        total_buy_trades,
        total_sell_trades,
        total_items: traded_items.len(),
        current_holding_items: positions.iter().filter(|p| p.current_quantity > 0).count(),
    })
}
