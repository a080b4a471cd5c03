//! Exchange balance valuation models.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Balance of one currency as reported by an exchange. Amounts arrive as strings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeBalance {
    pub symbol: String,
    pub available: String,
    #[serde(default)]
    pub in_order: String,
}

/// Value of one balance in the quote currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BalanceValuation {
    pub symbol: String,
    pub available: Decimal,
    pub in_order: Decimal,
    /// Last traded price, 1 for the quote currency itself.
    pub price: Decimal,
    /// Last minus 24h open.
    pub change_24h: Decimal,
    pub change_24h_pct: Decimal,
    pub value_available: Decimal,
    pub value_in_order: Decimal,
    pub value_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationTotals {
    pub value_available: Decimal,
    pub value_in_order: Decimal,
    pub value_total: Decimal,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSummary {
    pub quote_currency: String,
    pub valuations: Vec<BalanceValuation>,
    pub totals: ValuationTotals,
}
