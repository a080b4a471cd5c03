pub mod pnl;
pub mod valuation;
