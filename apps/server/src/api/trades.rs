use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, post};
use axum::{Json, Router};

use skinfolio_core::trades::{NewTrade, SellRequest, Trade, TradeWithItem};

use super::shared::parse_instant;
use crate::error::ApiResult;
use crate::main_lib::AppState;

async fn create_trade(
    State(state): State<Arc<AppState>>,
    Json(new_trade): Json<NewTrade>,
) -> ApiResult<Json<Trade>> {
    Ok(Json(state.trade_service.create_trade(new_trade).await?))
}

async fn create_sell_trade(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SellRequest>,
) -> ApiResult<Json<Trade>> {
    Ok(Json(state.trade_service.create_sell_trade(request).await?))
}

async fn get_trades(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<TradeWithItem>>> {
    Ok(Json(state.trade_service.get_trades()?))
}

async fn get_trade_history(
    Path(name_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<TradeWithItem>>> {
    Ok(Json(state.trade_service.get_trade_history(name_id)?))
}

#[derive(serde::Deserialize)]
struct DateRangeQuery {
    start: String,
    end: String,
}

async fn get_trades_in_range(
    State(state): State<Arc<AppState>>,
    Query(q): Query<DateRangeQuery>,
) -> ApiResult<Json<Vec<TradeWithItem>>> {
    let start = parse_instant(&q.start, "start")?;
    let end = parse_instant(&q.end, "end")?;
    Ok(Json(state.trade_service.get_trades_in_range(start, end)?))
}

async fn delete_trade(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Trade>> {
    Ok(Json(state.trade_service.delete_trade(&id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trades", get(get_trades).post(create_trade))
        .route("/trades/sell", post(create_sell_trade))
        .route("/trades/history/{nameId}", get(get_trade_history))
        .route("/trades/date-range", get(get_trades_in_range))
        .route("/trades/{id}", delete(delete_trade))
}
