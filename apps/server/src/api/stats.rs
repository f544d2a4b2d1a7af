use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;

use skinfolio_core::stats::{DailyFlow, PoolSummary};

use super::shared::parse_instant;
use crate::error::ApiResult;
use crate::main_lib::AppState;

#[derive(serde::Deserialize)]
struct DailyQuery {
    start: String,
    end: String,
}

async fn get_daily_flows(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DailyQuery>,
) -> ApiResult<Json<Vec<DailyFlow>>> {
    let start = parse_instant(&q.start, "start")?;
    let end = parse_instant(&q.end, "end")?;
    Ok(Json(state.stats_service.get_daily_flows(start, end)?))
}

#[derive(serde::Deserialize)]
struct PoolQuery {
    #[serde(rename = "manualValue")]
    manual_value: Option<Decimal>,
}

async fn get_pool_summary(
    State(state): State<Arc<AppState>>,
    Query(q): Query<PoolQuery>,
) -> ApiResult<Json<PoolSummary>> {
    Ok(Json(state.stats_service.get_pool_summary(q.manual_value)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/stats/daily", get(get_daily_flows))
        .route("/stats/pool", get(get_pool_summary))
}
