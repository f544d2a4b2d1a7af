use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::stats::stats_model::DailyFlow;
use crate::trades::TradeWithItem;

/// Buckets trades by UTC calendar day over the half-open range
/// `[start, end)`. Days without trades are omitted; the result is sorted
/// by day ascending.
pub fn aggregate_daily_flows(
    trades: &[TradeWithItem],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DailyFlow>> {
    if start > end {
        return Err(ValidationError::InvalidDateRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        }
        .into());
    }

    let mut buckets: BTreeMap<chrono::NaiveDate, (Decimal, Decimal)> = BTreeMap::new();
    for trade in trades {
        if trade.created_at < start || trade.created_at >= end {
            continue;
        }
        let bucket = buckets
            .entry(trade.created_at.date_naive())
            .or_insert((Decimal::ZERO, Decimal::ZERO));
        if trade.trade_type.is_buy() {
            bucket.0 += trade.total_amount;
        } else {
            bucket.1 += trade.total_amount;
        }
    }

    Ok(buckets
        .into_iter()
        .map(|(day, (total_buy, total_sell))| DailyFlow {
            day,
            total_buy,
            total_sell,
            net: total_sell - total_buy,
        })
        .collect())
}
