//! Prices module - the price source contract and its offline implementations.

mod prices_errors;
mod prices_model;
mod prices_traits;
mod static_price_source;
mod ticker_prices;

pub use prices_errors::PriceError;
pub use prices_model::{market_code, PriceMap, Ticker24h};
pub use prices_traits::PriceSourceTrait;
pub use static_price_source::StaticPriceSource;
pub use ticker_prices::{prices_from_tickers, TickerPriceSource};
