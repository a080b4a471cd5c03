use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Position and profit/loss of one asset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetPnl {
    pub symbol: String,
    pub quantity_held: Decimal,
    pub avg_cost_basis_per_unit: Decimal,
    pub total_cost_basis: Decimal,
    /// Zero when no price was supplied for the symbol.
    pub market_price: Decimal,
    pub market_value: Decimal,
    pub unrealized_pnl: Decimal,
    /// Percentage of cost basis, zero when nothing is held at cost.
    pub unrealized_pnl_percent: Decimal,
    pub realized_pnl: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioTotals {
    pub market_value: Decimal,
    pub total_cost_basis: Decimal,
    pub unrealized_pnl: Decimal,
    pub realized_pnl: Decimal,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    /// Sorted by market value, largest first.
    pub assets: Vec<AssetPnl>,
    pub totals: PortfolioTotals,
}

impl PortfolioSummary {
    pub fn asset(&self, symbol: &str) -> Option<&AssetPnl> {
        self.assets.iter().find(|a| a.symbol == symbol)
    }
}
