use std::sync::Arc;

use crate::inventory::inventory_model::*;
use crate::inventory::{InventoryRepositoryTrait, InventoryServiceTrait};
use crate::Result;

/// Read-side service over inventory positions.
pub struct InventoryService {
    inventory_repository: Arc<dyn InventoryRepositoryTrait>,
}

impl InventoryService {
    pub fn new(inventory_repository: Arc<dyn InventoryRepositoryTrait>) -> Self {
        Self {
            inventory_repository,
        }
    }
}

impl InventoryServiceTrait for InventoryService {
    fn get_positions(&self) -> Result<Vec<PositionWithItem>> {
        self.inventory_repository.get_positions_with_item()
    }

    fn get_position(&self, name_id: i64) -> Result<Option<PositionWithItem>> {
        self.inventory_repository.get_position_with_item(name_id)
    }

    fn get_current_quantity(&self, name_id: i64) -> Result<i32> {
        Ok(self
            .inventory_repository
            .get_position(name_id)?
            .map(|p| p.current_quantity)
            .unwrap_or(0))
    }
}
