//! SQLite storage implementation for Skinfolio.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the repository traits defined in
//! `skinfolio-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Repository implementations for items, trades, and inventory
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel dependencies
//! exist. `core` is database-agnostic and works with traits; the trade
//! repository here is also where the weighted-average-cost ledger functions
//! from `core` are applied inside write transactions, so a trade and its
//! inventory effect are always persisted together.

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod inventory;
pub mod items;
pub mod trades;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from skinfolio-core for convenience
pub use skinfolio_core::errors::{DatabaseError, Error, Result};
