use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::prices_model::{market_code, PriceMap, Ticker24h};
use super::prices_traits::PriceSourceTrait;
use crate::utils::decimal_utils::parse_optional_decimal;
use crate::Result;

/// Builds a price map from exchange tickers.
///
/// Only `BASE-QUOTE` markets for the requested quote currency are used; the
/// map is keyed by the base symbol. The quote currency itself is priced at 1.
pub fn prices_from_tickers(tickers: &[Ticker24h], quote_currency: &str) -> PriceMap {
    let suffix = format!("-{}", quote_currency.to_uppercase());
    let mut prices: PriceMap = tickers
        .iter()
        .filter_map(|ticker| {
            let market = ticker.market.to_uppercase();
            let base = market.strip_suffix(&suffix)?;
            let last = parse_optional_decimal(ticker.last.as_deref(), "last")?;
            Some((base.to_string(), last))
        })
        .collect();
    prices.insert(quote_currency.to_uppercase(), Decimal::ONE);
    prices
}

/// Price source over a snapshot of 24h tickers.
#[derive(Debug, Clone, Default)]
pub struct TickerPriceSource {
    tickers: Vec<Ticker24h>,
}

impl TickerPriceSource {
    pub fn new(tickers: Vec<Ticker24h>) -> Self {
        Self { tickers }
    }

    pub fn tickers(&self) -> &[Ticker24h] {
        &self.tickers
    }
}

#[async_trait]
impl PriceSourceTrait for TickerPriceSource {
    async fn get_prices(&self, symbols: &[String], quote_currency: &str) -> Result<PriceMap> {
        let all = prices_from_tickers(&self.tickers, quote_currency);
        let mut prices = PriceMap::with_capacity(symbols.len());
        for symbol in symbols {
            match all.get(&symbol.to_uppercase()) {
                Some(price) => {
                    prices.insert(symbol.clone(), *price);
                }
                None => debug!(
                    "No {} ticker for {}",
                    market_code(symbol, quote_currency),
                    symbol
                ),
            }
        }
        Ok(prices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ticker(market: &str, open: &str, last: &str) -> Ticker24h {
        Ticker24h {
            market: market.to_string(),
            open: Some(open.to_string()),
            last: Some(last.to_string()),
        }
    }

    #[test]
    fn test_prices_from_tickers_filters_quote_currency() {
        let tickers = vec![
            ticker("BTC-EUR", "58000", "60000.12"),
            ticker("ETH-EUR", "2900", "3000"),
            ticker("BTC-USDC", "63000", "64000"),
            Ticker24h {
                market: "XYZ-EUR".to_string(),
                open: None,
                last: None,
            },
        ];

        let prices = prices_from_tickers(&tickers, "eur");
        assert_eq!(prices.get("BTC"), Some(&dec!(60000.12)));
        assert_eq!(prices.get("ETH"), Some(&dec!(3000)));
        assert_eq!(prices.get("EUR"), Some(&dec!(1)));
        assert!(!prices.contains_key("XYZ"));
        assert_eq!(prices.len(), 3);
    }

    #[tokio::test]
    async fn test_ticker_source_omits_unpriced_symbols() {
        let source = TickerPriceSource::new(vec![ticker("SOL-EUR", "140", "150")]);
        let symbols = vec!["SOL".to_string(), "DOGE".to_string(), "EUR".to_string()];
        let prices = source.get_prices(&symbols, "EUR").await.unwrap();

        assert_eq!(prices.get("SOL"), Some(&dec!(150)));
        assert_eq!(prices.get("EUR"), Some(&dec!(1)));
        assert!(!prices.contains_key("DOGE"));
        assert_eq!(source.tickers().len(), 1);
    }
}
