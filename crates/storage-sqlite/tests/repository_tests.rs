use std::sync::Arc;

use chrono::{Duration, Utc};
use rust_decimal_macros::dec;

use skinfolio_core::inventory::{InventoryError, InventoryRepositoryTrait};
use skinfolio_core::items::{ItemRepositoryTrait, NewItem};
use skinfolio_core::trades::{NewTrade, TradeError, TradeRepositoryTrait, TradeType};
use skinfolio_core::Error;
use skinfolio_storage_sqlite::db::{init, spawn_writer, DbPool, WriteHandle};
use skinfolio_storage_sqlite::inventory::InventoryRepository;
use skinfolio_storage_sqlite::items::ItemRepository;
use skinfolio_storage_sqlite::trades::TradeRepository;

struct TestDb {
    // Held so the database file outlives the repositories.
    _dir: tempfile::TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("skinfolio-test.db");
    let pool = init(db_path.to_str().unwrap()).unwrap();
    let writer = spawn_writer(pool.clone());
    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn repositories(db: &TestDb) -> (ItemRepository, TradeRepository, InventoryRepository) {
    (
        ItemRepository::new(db.pool.clone(), db.writer.clone()),
        TradeRepository::new(db.pool.clone(), db.writer.clone()),
        InventoryRepository::new(db.pool.clone()),
    )
}

async fn register_item(items: &ItemRepository, name_id: i64, name: &str) {
    items
        .create_item(NewItem {
            market_hash_name: name.to_string(),
            en_name: name.to_string(),
            cn_name: format!("中文 {}", name),
            name_id,
        })
        .await
        .unwrap();
}

fn buy(name_id: i64, unit_price: rust_decimal::Decimal, quantity: i32) -> NewTrade {
    NewTrade {
        name_id,
        trade_type: TradeType::Buy,
        unit_price,
        quantity,
    }
}

fn sell(name_id: i64, unit_price: rust_decimal::Decimal, quantity: i32) -> NewTrade {
    NewTrade {
        name_id,
        trade_type: TradeType::Sell,
        unit_price,
        quantity,
    }
}

#[tokio::test]
async fn test_record_trade_creates_and_updates_position() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "AK-47 | Redline (Field-Tested)").await;

    let trade = trades.record_trade(buy(1, dec!(2), 10)).await.unwrap();
    assert_eq!(trade.total_amount, dec!(20));

    trades.record_trade(buy(1, dec!(5), 5)).await.unwrap();

    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 15);
    assert_eq!(position.weighted_average_cost, dec!(3.0000));
    assert_eq!(position.total_investment_cost, dec!(45));
}

#[tokio::test]
async fn test_sell_reduces_quantity_and_keeps_wac() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "AWP | Asiimov (Field-Tested)").await;

    trades.record_trade(buy(1, dec!(2), 10)).await.unwrap();
    trades.record_trade(buy(1, dec!(5), 5)).await.unwrap();
    trades.record_trade(sell(1, dec!(4), 5)).await.unwrap();

    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 10);
    assert_eq!(position.weighted_average_cost, dec!(3.0000));
    assert_eq!(position.total_investment_cost, dec!(30.0000));
}

#[tokio::test]
async fn test_oversell_rolls_back_whole_transaction() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "Glock-18 | Fade (Factory New)").await;

    trades.record_trade(buy(1, dec!(100), 2)).await.unwrap();

    let result = trades.record_trade(sell(1, dec!(120), 3)).await;
    assert!(matches!(
        result,
        Err(Error::Inventory(InventoryError::InsufficientStock {
            held: 2,
            requested: 3
        }))
    ));

    // Neither the trade row nor the position was touched.
    assert_eq!(trades.get_trades().unwrap().len(), 1);
    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 2);
}

#[tokio::test]
async fn test_full_liquidation_keeps_zero_quantity_row() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "USP-S | Kill Confirmed (Minimal Wear)").await;

    trades.record_trade(buy(1, dec!(7.5), 4)).await.unwrap();
    trades.record_trade(sell(1, dec!(8), 4)).await.unwrap();

    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 0);
    assert_eq!(position.weighted_average_cost, dec!(7.5));
}

#[tokio::test]
async fn test_delete_buy_rolls_position_back() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "M4A1-S | Printstream (Field-Tested)").await;

    trades.record_trade(buy(1, dec!(2), 10)).await.unwrap();
    let second = trades.record_trade(buy(1, dec!(5), 5)).await.unwrap();

    let deleted = trades.delete_trade(&second.id).await.unwrap();
    assert_eq!(deleted.id, second.id);

    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 10);
    assert_eq!(position.weighted_average_cost, dec!(2.0000));
    assert_eq!(trades.get_trades().unwrap().len(), 1);
}

#[tokio::test]
async fn test_delete_sell_restores_quantity_at_wac() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "Desert Eagle | Blaze (Factory New)").await;

    trades.record_trade(buy(1, dec!(3), 10)).await.unwrap();
    let sale = trades.record_trade(sell(1, dec!(5), 10)).await.unwrap();

    // The position survived liquidation at zero quantity, so the rollback
    // can restore onto it.
    trades.delete_trade(&sale.id).await.unwrap();

    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 10);
    assert_eq!(position.weighted_average_cost, dec!(3));
    assert_eq!(position.total_investment_cost, dec!(30));
}

#[tokio::test]
async fn test_delete_that_strands_a_later_sell_is_rejected() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 1, "StatTrak AK-47 | Vulcan (Minimal Wear)").await;

    let first = trades.record_trade(buy(1, dec!(2), 10)).await.unwrap();
    trades.record_trade(sell(1, dec!(3), 8)).await.unwrap();
    trades.record_trade(buy(1, dec!(4), 10)).await.unwrap();

    // The current quantity (12) could absorb removing the first BUY, but
    // the SELL of 8 would then have no prior stock to draw on.
    let result = trades.delete_trade(&first.id).await;
    assert!(matches!(
        result,
        Err(Error::Trade(TradeError::RollbackFailed { .. }))
    ));

    // Nothing was touched, and the stored history still replays.
    assert_eq!(trades.get_trades().unwrap().len(), 3);
    let position = inventory.get_position(1).unwrap().unwrap();
    assert_eq!(position.current_quantity, 12);
    let history = trades.get_trade_history().unwrap();
    let replayed = skinfolio_core::inventory::ledger::replay(history.iter()).unwrap();
    assert_eq!(replayed.quantity, 12);
}

#[tokio::test]
async fn test_delete_unknown_trade_is_not_found() {
    let db = setup();
    let (_, trades, _) = repositories(&db);

    let result = trades.delete_trade("no-such-id").await;
    assert!(matches!(
        result,
        Err(Error::Trade(TradeError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_get_trades_in_range_is_half_open() {
    let db = setup();
    let (items, trades, _) = repositories(&db);
    register_item(&items, 1, "P250 | Sand Dune (Battle-Scarred)").await;

    let before = Utc::now() - Duration::seconds(1);
    trades.record_trade(buy(1, dec!(1), 1)).await.unwrap();
    let after = Utc::now() + Duration::seconds(1);

    assert_eq!(trades.get_trades_in_range(before, after).unwrap().len(), 1);
    assert_eq!(trades.get_trades_in_range(after, after).unwrap().len(), 0);
    assert_eq!(
        trades.get_trades_in_range(before, before).unwrap().len(),
        0
    );
}

#[tokio::test]
async fn test_record_trade_for_unregistered_item_fails_fk() {
    let db = setup();
    let (_, trades, _) = repositories(&db);

    // No item row exists; the foreign key rejects the insert.
    let result = trades.record_trade(buy(42, dec!(1), 1)).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_insert_if_absent_skips_duplicates() {
    let db = setup();
    let (items, _, _) = repositories(&db);

    let new_item = NewItem {
        market_hash_name: "Butterfly Knife | Doppler (Factory New)".to_string(),
        en_name: "Butterfly Doppler".to_string(),
        cn_name: "蝴蝶刀".to_string(),
        name_id: 77,
    };
    assert!(items.insert_if_absent(new_item.clone()).await.unwrap());
    assert!(!items.insert_if_absent(new_item.clone()).await.unwrap());

    // A different hash name with a colliding name_id is also a duplicate.
    let colliding = NewItem {
        market_hash_name: "Different Name".to_string(),
        name_id: 77,
        ..new_item
    };
    assert!(!items.insert_if_absent(colliding).await.unwrap());

    assert_eq!(items.get_items().unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_items_matches_all_name_columns() {
    let db = setup();
    let (items, _, _) = repositories(&db);
    register_item(&items, 1, "AK-47 | Redline (Field-Tested)").await;
    register_item(&items, 2, "AK-47 | Asiimov (Field-Tested)").await;
    register_item(&items, 3, "AWP | Dragon Lore (Factory New)").await;

    assert_eq!(items.search_items("ak-47", 10).unwrap().len(), 2);
    assert_eq!(items.search_items("dragon", 10).unwrap().len(), 1);
    assert_eq!(items.search_items("ak-47", 1).unwrap().len(), 1);
    assert_eq!(items.search_items("m249", 10).unwrap().len(), 0);
}

#[tokio::test]
async fn test_positions_with_item_carry_display_names() {
    let db = setup();
    let (items, trades, inventory) = repositories(&db);
    register_item(&items, 9, "Five-SeveN | Case Hardened (Well-Worn)").await;
    trades.record_trade(buy(9, dec!(12), 2)).await.unwrap();

    let positions = inventory.get_positions_with_item().unwrap();
    assert_eq!(positions.len(), 1);
    assert_eq!(
        positions[0].en_name,
        "Five-SeveN | Case Hardened (Well-Worn)"
    );
    assert_eq!(positions[0].current_quantity, 2);
}
