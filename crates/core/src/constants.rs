/// Quote currency used when the caller does not pick one
pub const DEFAULT_QUOTE_CURRENCY: &str = "EUR";

/// Decimal precision for currency amounts and percentages
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for asset quantities
pub const QUANTITY_DECIMAL_PRECISION: u32 = 8;

/// Decimal precision for exchange prices in balance valuations
pub const PRICE_DECIMAL_PRECISION: u32 = 6;

/// Remaining lot quantity at or below this is treated as fully consumed
pub const LOT_QUANTITY_EPSILON: &str = "0.000000000001";
