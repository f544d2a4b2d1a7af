//! API error type and the mapping from core errors to HTTP status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use skinfolio_core::errors::{DatabaseError, Error};
use skinfolio_core::inventory::InventoryError;
use skinfolio_core::items::ImportError;
use skinfolio_core::trades::TradeError;

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("{}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(_) => ApiError::BadRequest(err.to_string()),
            Error::Trade(TradeError::InvalidParameters(_)) => ApiError::BadRequest(err.to_string()),
            Error::Trade(TradeError::UnknownItem(_)) | Error::Trade(TradeError::NotFound(_)) => {
                ApiError::NotFound(err.to_string())
            }
            Error::Trade(TradeError::RollbackFailed { .. }) => ApiError::Conflict(err.to_string()),
            Error::Inventory(InventoryError::InsufficientStock { .. }) => {
                ApiError::Conflict(err.to_string())
            }
            Error::Inventory(InventoryError::NotFound(_)) => ApiError::NotFound(err.to_string()),
            Error::Inventory(InventoryError::InvalidRollback(_)) => {
                ApiError::Conflict(err.to_string())
            }
            Error::Import(ImportError::FileTooLarge { .. }) => {
                ApiError::PayloadTooLarge(err.to_string())
            }
            Error::Import(ImportError::UnsupportedFile(_)) => ApiError::BadRequest(err.to_string()),
            Error::Import(_) => ApiError::UnprocessableEntity(err.to_string()),
            Error::Database(DatabaseError::NotFound(_)) => ApiError::NotFound(err.to_string()),
            Error::Database(DatabaseError::UniqueViolation(_)) => {
                ApiError::Conflict(err.to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
