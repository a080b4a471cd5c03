use super::prices_model::PriceMap;
use crate::Result;
use async_trait::async_trait;

/// Contract for current-price lookups.
#[async_trait]
pub trait PriceSourceTrait: Send + Sync {
    /// Returns the latest price for each requested symbol in `quote_currency`.
    /// Symbols the source cannot price may be omitted from the map.
    async fn get_prices(&self, symbols: &[String], quote_currency: &str) -> Result<PriceMap>;
}
