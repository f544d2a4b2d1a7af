use thiserror::Error;

/// Errors raised by inventory queries and ledger updates.
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Insufficient inventory: holding {held}, tried to sell {requested}")]
    InsufficientStock { held: i32, requested: i32 },

    #[error("No inventory position for nameId {0}")]
    NotFound(i64),

    #[error("Rollback would corrupt the position: {0}")]
    InvalidRollback(String),
}
