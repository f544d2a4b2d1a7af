//! Stats module - daily cash flows and the investment-pool summary.

mod daily_flow;
mod pool_calculator;
mod stats_model;
mod stats_service;
mod stats_traits;


pub use daily_flow::aggregate_daily_flows;
pub use pool_calculator::compute_pool_summary;
pub use stats_model::{DailyFlow, PoolSummary};
pub use stats_service::StatsService;
pub use stats_traits::StatsServiceTrait;
