use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use skinfolio_server::{api::app_router, build_state, Config};

async fn test_app() -> (Router, TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp
            .path()
            .join("skinfolio-test.db")
            .to_string_lossy()
            .to_string(),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state), tmp)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn register_item(app: &Router, name_id: i64, name: &str) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/items",
        Some(json!({
            "marketHashName": name,
            "enName": name,
            "cnName": format!("中文 {}", name),
            "nameId": name_id,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

async fn record_buy(app: &Router, name_id: i64, unit_price: &str, quantity: i32) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/trades",
        Some(json!({
            "nameId": name_id,
            "type": "BUY",
            "unitPrice": unit_price,
            "quantity": quantity,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}

#[tokio::test]
async fn test_trade_workflow_updates_inventory_and_stats() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "AK-47 | Redline (Field-Tested)").await;

    record_buy(&app, 1, "2", 10).await;
    record_buy(&app, 1, "5", 5).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/trades/sell",
        Some(json!({ "nameId": 1, "unitPrice": "4", "quantity": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["type"], "SELL");
    assert_eq!(body["totalAmount"], "20");

    let (status, position) = send(&app, Method::GET, "/api/inventory/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(position["currentQuantity"], 10);
    assert_eq!(position["weightedAverageCost"], "3");
    assert_eq!(position["enName"], "AK-47 | Redline (Field-Tested)");

    let (status, quantity) = send(&app, Method::GET, "/api/inventory/1/quantity", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(quantity, json!({ "nameId": 1, "quantity": 10 }));

    let (status, pool) = send(&app, Method::GET, "/api/stats/pool", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pool["totalInvestment"], "45");
    assert_eq!(pool["totalWithdrawal"], "20");
    assert_eq!(pool["peakNetInvestment"], "45");
    assert_eq!(pool["realizedProfit"], "5");
    assert_eq!(pool["totalBuyTrades"], 2);
    assert_eq!(pool["totalSellTrades"], 1);
    assert_eq!(pool["currentHoldingItems"], 1);
}

#[tokio::test]
async fn test_pool_summary_accepts_manual_value() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "AWP | Asiimov (Field-Tested)").await;
    record_buy(&app, 1, "10", 3).await;

    let (status, pool) = send(
        &app,
        Method::GET,
        "/api/stats/pool?manualValue=45",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pool["currentCostBasis"], "30");
    assert_eq!(pool["currentHoldingValue"], "45");
    assert_eq!(pool["unrealizedProfit"], "15");
}

#[tokio::test]
async fn test_oversell_returns_conflict() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "Glock-18 | Fade (Factory New)").await;
    record_buy(&app, 1, "100", 2).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/trades/sell",
        Some(json!({ "nameId": 1, "unitPrice": "120", "quantity": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("Insufficient"));

    // The failed sell left no trade behind.
    let (_, trades) = send(&app, Method::GET, "/api/trades", None).await;
    assert_eq!(trades.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_trade_for_unknown_item_is_not_found() {
    let (app, _tmp) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/trades",
        Some(json!({ "nameId": 999, "type": "BUY", "unitPrice": "1", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_trade_parameters_are_bad_request() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "P250 | Sand Dune (Battle-Scarred)").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/trades",
        Some(json!({ "nameId": 1, "type": "BUY", "unitPrice": "1", "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/trades",
        Some(json!({ "nameId": 1, "type": "BUY", "unitPrice": "1.00001", "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_trade_rolls_back_position() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "M4A1-S | Printstream (Field-Tested)").await;

    record_buy(&app, 1, "2", 10).await;
    let second = record_buy(&app, 1, "5", 5).await;

    let uri = format!("/api/trades/{}", second["id"].as_str().unwrap());
    let (status, deleted) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], second["id"]);

    let (_, position) = send(&app, Method::GET, "/api/inventory/1", None).await;
    assert_eq!(position["currentQuantity"], 10);
    assert_eq!(position["weightedAverageCost"], "2");
}

#[tokio::test]
async fn test_missing_position_is_not_found() {
    let (app, _tmp) = test_app().await;

    let (status, _) = send(&app, Method::GET, "/api/inventory/12345", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Quantity lookups report zero instead.
    let (status, body) = send(&app, Method::GET, "/api/inventory/12345/quantity", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["quantity"], 0);
}

#[tokio::test]
async fn test_item_search_and_limit() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "AK-47 | Redline (Field-Tested)").await;
    register_item(&app, 2, "AK-47 | Asiimov (Field-Tested)").await;

    let (status, results) = send(
        &app,
        Method::GET,
        "/api/items/search?keyword=ak-47",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results.as_array().unwrap().len(), 2);

    let (_, limited) = send(
        &app,
        Method::GET,
        "/api/items/search?keyword=ak-47&limit=1",
        None,
    )
    .await;
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_item_import_reports_skips() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 100, "Existing Item").await;

    let payload = json!({
        "Existing Item": { "en_name": "Existing Item", "cn_name": "已有", "name_id": 100 },
        "Fresh Item": { "en_name": "Fresh", "cn_name": "新", "name_id": 101 },
    });
    let (status, summary) = send(
        &app,
        Method::POST,
        "/api/items/import",
        Some(json!({ "jsonData": payload.to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalItems"], 2);
    assert_eq!(summary["importedCount"], 1);
    assert_eq!(summary["skippedCount"], 1);
    assert_eq!(summary["skippedItems"], json!(["Existing Item"]));
}

async fn send_import_file(app: &Router, file_name: &str, content: &str) -> (StatusCode, Value) {
    let boundary = "skinfolio-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{n}\"\r\n\
         Content-Type: application/json\r\n\r\n{c}\r\n--{b}--\r\n",
        b = boundary,
        n = file_name,
        c = content
    );
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/items/import-file")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_item_import_file_checks_extension() {
    let (app, _tmp) = test_app().await;
    let payload =
        json!({ "Fresh Item": { "en_name": "Fresh", "cn_name": "新", "name_id": 7 } }).to_string();

    let (status, body) = send_import_file(&app, "items.txt", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("items.txt"));

    let (status, summary) = send_import_file(&app, "items.json", &payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["importedCount"], 1);
}

#[tokio::test]
async fn test_malformed_import_payload_is_unprocessable() {
    let (app, _tmp) = test_app().await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/items/import",
        Some(json!({ "jsonData": "[1, 2, 3]" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_date_range_validation() {
    let (app, _tmp) = test_app().await;

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/trades/date-range?start=not-a-date&end=2025-03-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/stats/daily?start=2025-03-10T00:00:00Z&end=2025-03-01T00:00:00Z",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_daily_flows_bucket_by_day() {
    let (app, _tmp) = test_app().await;
    register_item(&app, 1, "USP-S | Kill Confirmed (Minimal Wear)").await;
    record_buy(&app, 1, "10", 2).await;

    let start = (chrono::Utc::now() - chrono::Duration::days(1)).to_rfc3339();
    let end = (chrono::Utc::now() + chrono::Duration::days(1)).to_rfc3339();
    let uri = format!(
        "/api/stats/daily?start={}&end={}",
        urlencode(&start),
        urlencode(&end)
    );
    let (status, flows) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let flows = flows.as_array().unwrap();
    assert_eq!(flows.len(), 1);
    assert_eq!(flows[0]["totalBuy"], "20");
    assert_eq!(flows[0]["net"], "-20");
}

// Just enough escaping for RFC3339 strings in a query component.
fn urlencode(value: &str) -> String {
    value.replace('+', "%2B").replace(':', "%3A")
}
