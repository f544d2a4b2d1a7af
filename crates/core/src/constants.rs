/// Decimal precision for unit prices and weighted-average costs
pub const PRICE_DECIMAL_PRECISION: u32 = 4;

/// Decimal precision for currency summaries shown to users
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default number of results returned by item search
pub const DEFAULT_SEARCH_LIMIT: i64 = 15;

/// Hard cap on item search results
pub const MAX_SEARCH_LIMIT: i64 = 50;

/// Maximum accepted size for an item import file (50 MB)
pub const MAX_IMPORT_FILE_BYTES: usize = 50 * 1024 * 1024;
