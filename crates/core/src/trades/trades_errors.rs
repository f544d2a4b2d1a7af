use thiserror::Error;

/// Errors raised by the trade workflow.
#[derive(Error, Debug)]
pub enum TradeError {
    #[error("Invalid trade parameters: {0}")]
    InvalidParameters(String),

    #[error("Trade not found: {0}")]
    NotFound(String),

    #[error("No registered item with nameId {0}")]
    UnknownItem(i64),

    #[error("Cannot roll back trade {trade_id}: {reason}")]
    RollbackFailed { trade_id: String, reason: String },
}
