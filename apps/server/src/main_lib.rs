use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use skinfolio_core::inventory::{InventoryService, InventoryServiceTrait};
use skinfolio_core::items::{ItemService, ItemServiceTrait};
use skinfolio_core::stats::{StatsService, StatsServiceTrait};
use skinfolio_core::trades::{TradeService, TradeServiceTrait};
use skinfolio_storage_sqlite::db;
use skinfolio_storage_sqlite::inventory::InventoryRepository;
use skinfolio_storage_sqlite::items::ItemRepository;
use skinfolio_storage_sqlite::trades::TradeRepository;

use crate::config::Config;

pub struct AppState {
    pub item_service: Arc<dyn ItemServiceTrait>,
    pub trade_service: Arc<dyn TradeServiceTrait>,
    pub inventory_service: Arc<dyn InventoryServiceTrait>,
    pub stats_service: Arc<dyn StatsServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("SKF_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let pool = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);
    let writer = db::spawn_writer(pool.clone());

    let item_repository = Arc::new(ItemRepository::new(pool.clone(), writer.clone()));
    let trade_repository = Arc::new(TradeRepository::new(pool.clone(), writer.clone()));
    let inventory_repository = Arc::new(InventoryRepository::new(pool.clone()));

    let inventory_service = Arc::new(InventoryService::new(inventory_repository.clone()));
    let item_service = Arc::new(ItemService::new(item_repository.clone()));
    let trade_service = Arc::new(TradeService::new(
        trade_repository.clone(),
        item_repository,
        inventory_service.clone(),
    ));
    let stats_service = Arc::new(StatsService::new(trade_repository, inventory_repository));

    Ok(Arc::new(AppState {
        item_service,
        trade_service,
        inventory_service,
        stats_service,
        db_path: config.db_path.clone(),
    }))
}
