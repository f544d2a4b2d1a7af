mod model;
mod repository;

pub use model::ItemDB;
pub use repository::ItemRepository;
