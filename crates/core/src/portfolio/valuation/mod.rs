//! Current value of exchange balances from 24h tickers.

mod valuation_calculator;
mod valuation_model;

pub use valuation_calculator::calculate_valuations;
pub use valuation_model::{BalanceValuation, ExchangeBalance, ValuationSummary, ValuationTotals};
