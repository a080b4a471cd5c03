//! FIFO profit/loss engine.

mod lots_model;
mod pnl_calculator;
mod pnl_model;
mod pnl_service;


pub use lots_model::{Lot, LotQueue};
pub use pnl_calculator::compute_portfolio;
pub use pnl_model::{AssetPnl, PortfolioSummary, PortfolioTotals};
pub use pnl_service::PnlService;
