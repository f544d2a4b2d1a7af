//! Skinfolio HTTP server.
//!
//! Wires the core services and the SQLite repositories together and
//! exposes them over a JSON REST API.

pub mod api;
pub mod config;
pub mod error;
pub mod main_lib;

pub use config::Config;
pub use main_lib::{build_state, init_tracing, AppState};
