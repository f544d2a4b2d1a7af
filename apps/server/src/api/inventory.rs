use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use skinfolio_core::inventory::PositionWithItem;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn get_positions(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<PositionWithItem>>> {
    Ok(Json(state.inventory_service.get_positions()?))
}

async fn get_position(
    Path(name_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PositionWithItem>> {
    state
        .inventory_service
        .get_position(name_id)?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("No position for nameId {}", name_id)))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct QuantityResponse {
    name_id: i64,
    quantity: i32,
}

async fn get_quantity(
    Path(name_id): Path<i64>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<QuantityResponse>> {
    let quantity = state.inventory_service.get_current_quantity(name_id)?;
    Ok(Json(QuantityResponse { name_id, quantity }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/inventory", get(get_positions))
        .route("/inventory/{nameId}", get(get_position))
        .route("/inventory/{nameId}/quantity", get(get_quantity))
}
