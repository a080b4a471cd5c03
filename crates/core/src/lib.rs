//! Coinfolio Core - transactions, price sources and the profit/loss engine.
//!
//! The engine in [`portfolio::pnl`] is a pure function of a transaction list
//! and a price map. Everything that talks to the outside world (exchanges,
//! storage, pricing APIs) is expressed as a trait that callers implement.

pub mod constants;
pub mod errors;
pub mod portfolio;
pub mod prices;
pub mod transactions;
pub mod utils;

pub use portfolio::pnl::{compute_portfolio, AssetPnl, PortfolioSummary, PortfolioTotals};
pub use prices::PriceMap;
pub use transactions::{NewTransaction, Transaction, TransactionType};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
