use thiserror::Error;

/// Errors raised while importing the item catalog.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Invalid import payload: {0}")]
    Format(String),

    #[error("Import payload is empty")]
    EmptyPayload,

    #[error("Import file too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: usize, limit: usize },

    #[error("Unsupported import file: {0}")]
    UnsupportedFile(String),
}
