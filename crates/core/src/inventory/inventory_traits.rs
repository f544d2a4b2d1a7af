use super::inventory_model::*;
use crate::Result;

/// Trait defining the contract for Inventory repository operations.
///
/// Positions are read-only from the outside; all mutations go through the
/// trade repository, which applies ledger updates transactionally.
pub trait InventoryRepositoryTrait: Send + Sync {
    fn get_positions(&self) -> Result<Vec<Position>>;
    fn get_positions_with_item(&self) -> Result<Vec<PositionWithItem>>;
    fn get_position(&self, name_id: i64) -> Result<Option<Position>>;
    fn get_position_with_item(&self, name_id: i64) -> Result<Option<PositionWithItem>>;
}

/// Trait defining the contract for Inventory service operations.
pub trait InventoryServiceTrait: Send + Sync {
    fn get_positions(&self) -> Result<Vec<PositionWithItem>>;
    fn get_position(&self, name_id: i64) -> Result<Option<PositionWithItem>>;
    /// Quantity currently on hand, zero when no position exists.
    fn get_current_quantity(&self, name_id: i64) -> Result<i32>;
}
