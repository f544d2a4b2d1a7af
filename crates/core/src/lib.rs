//! Skinfolio Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic for the trading tracker:
//! the item catalog, the trade ledger, the weighted-average-cost
//! inventory model, and the portfolio statistics. It is
//! database-agnostic and defines repository traits that are
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod errors;
pub mod inventory;
pub mod items;
pub mod stats;
pub mod trades;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
