//! Items module - the item catalog and bulk import.

mod items_errors;
mod items_model;
mod items_service;
mod items_traits;


pub use items_errors::ImportError;
pub use items_model::{ImportSummary, Item, ItemImportEntry, NewItem};
pub use items_service::ItemService;
pub use items_traits::{ItemRepositoryTrait, ItemServiceTrait};
