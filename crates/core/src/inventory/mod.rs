//! Inventory module - per-item positions and the weighted-average-cost ledger.

mod inventory_errors;
mod inventory_model;
mod inventory_service;
mod inventory_traits;
pub mod ledger;


pub use inventory_errors::InventoryError;
pub use inventory_model::{Position, PositionWithItem};
pub use inventory_service::InventoryService;
pub use inventory_traits::{InventoryRepositoryTrait, InventoryServiceTrait};
