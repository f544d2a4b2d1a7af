//! Trades module - trade records, validation, and the trade workflow.

mod trades_constants;
mod trades_errors;
mod trades_model;
mod trades_service;
mod trades_traits;


pub use trades_constants::*;
pub use trades_errors::TradeError;
pub use trades_model::{NewTrade, SellRequest, Trade, TradeType, TradeWithItem};
pub use trades_service::TradeService;
pub use trades_traits::{TradeRepositoryTrait, TradeServiceTrait};
