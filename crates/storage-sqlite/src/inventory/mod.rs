mod model;
mod repository;

pub use model::InventoryDB;
pub use repository::InventoryRepository;
