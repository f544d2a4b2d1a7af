//! REST API routers, one module per domain.

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub mod inventory;
pub mod items;
pub mod shared;
pub mod stats;
pub mod trades;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(items::router())
        .merge(trades::router())
        .merge(inventory::router())
        .merge(stats::router());

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
