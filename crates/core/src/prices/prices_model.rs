use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current price per asset symbol in a single quote currency.
/// A symbol absent from the map is priced at zero by the engine.
pub type PriceMap = HashMap<String, Decimal>;

/// 24h ticker as returned by the exchange (`/v2/ticker/24h`).
/// Prices arrive as strings and may be missing for illiquid markets.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24h {
    /// Market code, e.g. `BTC-EUR`.
    pub market: String,
    #[serde(default)]
    pub open: Option<String>,
    #[serde(default)]
    pub last: Option<String>,
}

/// Formats the market code for a base asset against a quote currency.
pub fn market_code(symbol: &str, quote_currency: &str) -> String {
    format!("{}-{}", symbol, quote_currency)
}
