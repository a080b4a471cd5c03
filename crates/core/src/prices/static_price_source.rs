use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::prices_errors::PriceError;
use super::prices_model::PriceMap;
use super::prices_traits::PriceSourceTrait;
use crate::Result;

/// Price source backed by a fixed map, for offline use and tests.
#[derive(Debug, Clone)]
pub struct StaticPriceSource {
    prices: PriceMap,
}

impl StaticPriceSource {
    pub fn new(prices: PriceMap) -> Self {
        let prices = prices
            .into_iter()
            .map(|(symbol, price)| (symbol.trim().to_uppercase(), price))
            .collect();
        Self { prices }
    }

    /// Parses a JSON object of `symbol -> price` (numbers or numeric strings).
    /// Negative prices are rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let prices: PriceMap = serde_json::from_str(json)?;
        let negative = prices
            .iter()
            .find(|(_, price)| price.is_sign_negative() && !price.is_zero());
        if let Some((symbol, price)) = negative {
            return Err(PriceError::InvalidPrice {
                symbol: symbol.clone(),
                price: price.to_string(),
            }
            .into());
        }
        Ok(Self::new(prices))
    }

    /// Fallback prices used when no live quote is available.
    pub fn fallback() -> Self {
        Self::new(PriceMap::from([
            ("BTC".to_string(), dec!(60000)),
            ("ETH".to_string(), dec!(3000)),
            ("SOL".to_string(), dec!(150)),
        ]))
    }

    pub fn price(&self, symbol: &str) -> Decimal {
        self.prices
            .get(&symbol.trim().to_uppercase())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

impl Default for StaticPriceSource {
    fn default() -> Self {
        Self::fallback()
    }
}

#[async_trait]
impl PriceSourceTrait for StaticPriceSource {
    async fn get_prices(&self, symbols: &[String], quote_currency: &str) -> Result<PriceMap> {
        debug!(
            "Serving {} static prices (quote currency {} is not converted)",
            symbols.len(),
            quote_currency
        );
        Ok(symbols
            .iter()
            .map(|symbol| (symbol.clone(), self.price(symbol)))
            .collect())
    }
}
