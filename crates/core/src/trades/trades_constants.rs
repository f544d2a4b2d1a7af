/// Trade types
///
/// The closed set of trade directions. Stored and serialized as the raw
/// string values below.

/// Acquisition of items. Increases inventory quantity and blends the unit
/// price into the weighted-average cost.
pub const TRADE_TYPE_BUY: &str = "BUY";

/// Disposal of items. Decreases inventory quantity; the weighted-average
/// cost of the remaining units is unchanged.
pub const TRADE_TYPE_SELL: &str = "SELL";
