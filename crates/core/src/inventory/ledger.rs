//! The weighted-average-cost ledger.
//!
//! Pure arithmetic over per-item position states. Folding an item's trades
//! in creation order through [`apply`] reproduces the stored inventory
//! position exactly; the storage layer runs the same functions inside its
//! write transactions.
//!
//! Update rules: a BUY of `q @ p` into `(Q, C)` yields
//! `C' = (Q*C + q*p) / (Q + q)` (rounded to four fractional digits,
//! half-up) and `Q' = Q + q`. A SELL of `q` yields `Q' = Q - q` and leaves
//! `C` untouched; selling never alters the cost basis of the remaining
//! units.

use crate::constants::PRICE_DECIMAL_PRECISION;
use crate::inventory::inventory_errors::InventoryError;
use crate::trades::{Trade, TradeType};
use rust_decimal::{Decimal, RoundingStrategy};

/// Position arithmetic state: quantity on hand, weighted-average cost, and
/// accumulated investment cost.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionState {
    pub quantity: i32,
    pub weighted_average_cost: Decimal,
    pub total_investment_cost: Decimal,
}

/// Outcome of applying one trade to a position state.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerEntry {
    pub state: PositionState,
    /// `(sell price - weighted-average cost) * quantity` for a SELL,
    /// zero for a BUY.
    pub realized_profit: Decimal,
}

fn round_cost(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

impl PositionState {
    /// State after an opening BUY into an empty position.
    pub fn opened(quantity: i32, unit_price: Decimal) -> Self {
        Self {
            quantity,
            weighted_average_cost: unit_price,
            total_investment_cost: unit_price * Decimal::from(quantity),
        }
    }

    /// Blends a BUY into the position.
    pub fn apply_buy(&self, quantity: i32, unit_price: Decimal) -> PositionState {
        if self.quantity == 0 && self.total_investment_cost.is_zero() {
            return PositionState::opened(quantity, unit_price);
        }
        let new_quantity = self.quantity + quantity;
        let new_total = self.total_investment_cost + unit_price * Decimal::from(quantity);
        PositionState {
            quantity: new_quantity,
            weighted_average_cost: round_cost(new_total / Decimal::from(new_quantity)),
            total_investment_cost: new_total,
        }
    }

    /// Removes a SELL's quantity from the position and reports the realized
    /// profit against the current weighted-average cost.
    ///
    /// An oversell is rejected, never clamped. The remaining investment
    /// cost is re-derived as `weighted_average_cost * quantity` so the
    /// at-rest invariant holds exactly.
    pub fn apply_sell(
        &self,
        quantity: i32,
        unit_price: Decimal,
    ) -> std::result::Result<LedgerEntry, InventoryError> {
        if quantity > self.quantity {
            return Err(InventoryError::InsufficientStock {
                held: self.quantity,
                requested: quantity,
            });
        }
        let new_quantity = self.quantity - quantity;
        let realized_profit = (unit_price - self.weighted_average_cost) * Decimal::from(quantity);
        Ok(LedgerEntry {
            state: PositionState {
                quantity: new_quantity,
                weighted_average_cost: self.weighted_average_cost,
                total_investment_cost: self.weighted_average_cost * Decimal::from(new_quantity),
            },
            realized_profit,
        })
    }

    /// Applies one trade, dispatching on its direction.
    pub fn apply(&self, trade: &Trade) -> std::result::Result<LedgerEntry, InventoryError> {
        match trade.trade_type {
            TradeType::Buy => Ok(LedgerEntry {
                state: self.apply_buy(trade.quantity, trade.unit_price),
                realized_profit: Decimal::ZERO,
            }),
            TradeType::Sell => self.apply_sell(trade.quantity, trade.unit_price),
        }
    }

    /// Reverses a previously applied BUY: removes its quantity and cost and
    /// recomputes the weighted-average cost of what remains.
    pub fn rollback_buy(
        &self,
        quantity: i32,
        unit_price: Decimal,
    ) -> std::result::Result<PositionState, InventoryError> {
        let new_quantity = self.quantity - quantity;
        if new_quantity < 0 {
            return Err(InventoryError::InvalidRollback(format!(
                "removing {} units would leave a negative quantity (holding {})",
                quantity, self.quantity
            )));
        }
        let new_total = self.total_investment_cost - unit_price * Decimal::from(quantity);
        if new_total.is_sign_negative() {
            return Err(InventoryError::InvalidRollback(
                "removing the trade's cost would leave a negative investment cost".to_string(),
            ));
        }
        if new_quantity == 0 {
            return Ok(PositionState::default());
        }
        Ok(PositionState {
            quantity: new_quantity,
            weighted_average_cost: round_cost(new_total / Decimal::from(new_quantity)),
            total_investment_cost: new_total,
        })
    }

    /// Reverses a previously applied SELL: restores its quantity at the
    /// position's retained weighted-average cost.
    pub fn rollback_sell(&self, quantity: i32) -> PositionState {
        let new_quantity = self.quantity + quantity;
        PositionState {
            quantity: new_quantity,
            weighted_average_cost: self.weighted_average_cost,
            total_investment_cost: self.total_investment_cost
                + self.weighted_average_cost * Decimal::from(quantity),
        }
    }
}

/// Replays one item's trades in the given order into a final position
/// state. The fold is deterministic and order-dependent.
pub fn replay<'a, I>(trades: I) -> std::result::Result<PositionState, InventoryError>
where
    I: IntoIterator<Item = &'a Trade>,
{
    let mut state = PositionState::default();
    for trade in trades {
        state = state.apply(trade)?.state;
    }
    Ok(state)
}
