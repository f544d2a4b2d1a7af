use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::routing::{get, post};
use axum::{Json, Router};

use skinfolio_core::constants::MAX_IMPORT_FILE_BYTES;
use skinfolio_core::items::{ImportError, ImportSummary, Item, NewItem};
use skinfolio_core::Error;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

async fn get_items(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.item_service.get_items()?))
}

#[derive(serde::Deserialize)]
struct SearchQuery {
    keyword: String,
    limit: Option<i64>,
}

async fn search_items(
    State(state): State<Arc<AppState>>,
    Query(q): Query<SearchQuery>,
) -> ApiResult<Json<Vec<Item>>> {
    Ok(Json(state.item_service.search_items(&q.keyword, q.limit)?))
}

async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(new_item): Json<NewItem>,
) -> ApiResult<Json<Item>> {
    Ok(Json(state.item_service.create_item(new_item).await?))
}

#[derive(serde::Deserialize)]
struct ImportBody {
    #[serde(rename = "jsonData")]
    json_data: String,
}

async fn import_items(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ImportBody>,
) -> ApiResult<Json<ImportSummary>> {
    Ok(Json(state.item_service.import_items(&body.json_data).await?))
}

async fn import_items_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ApiResult<Json<ImportSummary>> {
    let mut payload: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }
        if let Some(file_name) = field.file_name() {
            if !file_name.to_ascii_lowercase().ends_with(".json") {
                return Err(
                    Error::Import(ImportError::UnsupportedFile(file_name.to_string())).into(),
                );
            }
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
        if bytes.len() > MAX_IMPORT_FILE_BYTES {
            return Err(Error::Import(ImportError::FileTooLarge {
                size: bytes.len(),
                limit: MAX_IMPORT_FILE_BYTES,
            })
            .into());
        }
        payload = Some(
            String::from_utf8(bytes.to_vec())
                .map_err(|e| ApiError::BadRequest(format!("File is not valid UTF-8: {}", e)))?,
        );
    }

    let payload = payload
        .ok_or_else(|| ApiError::BadRequest("Missing 'file' field in multipart request".into()))?;
    Ok(Json(state.item_service.import_items(&payload).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/items", get(get_items).post(create_item))
        .route("/items/search", get(search_items))
        .route(
            "/items/import",
            post(import_items).layer(DefaultBodyLimit::max(MAX_IMPORT_FILE_BYTES + 64 * 1024)),
        )
        .route(
            "/items/import-file",
            post(import_items_file).layer(DefaultBodyLimit::max(MAX_IMPORT_FILE_BYTES + 64 * 1024)),
        )
}
