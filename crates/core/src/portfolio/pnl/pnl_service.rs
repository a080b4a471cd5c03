use log::debug;
use std::sync::Arc;

use super::pnl_calculator::compute_portfolio;
use super::pnl_model::PortfolioSummary;
use crate::errors::Result;
use crate::prices::PriceSourceTrait;
use crate::transactions::TransactionSourceTrait;

/// Loads transactions and prices from its collaborators and runs the PnL engine.
pub struct PnlService {
    transaction_source: Arc<dyn TransactionSourceTrait>,
    price_source: Arc<dyn PriceSourceTrait>,
    quote_currency: String,
}

impl PnlService {
    pub fn new(
        transaction_source: Arc<dyn TransactionSourceTrait>,
        price_source: Arc<dyn PriceSourceTrait>,
        quote_currency: impl Into<String>,
    ) -> Self {
        Self {
            transaction_source,
            price_source,
            quote_currency: quote_currency.into(),
        }
    }

    pub fn quote_currency(&self) -> &str {
        &self.quote_currency
    }

    pub async fn get_portfolio_summary(&self) -> Result<PortfolioSummary> {
        let transactions = self.transaction_source.get_transactions().await?;

        let mut symbols: Vec<String> = Vec::new();
        for tx in &transactions {
            if !symbols.contains(&tx.asset_symbol) {
                symbols.push(tx.asset_symbol.clone());
            }
        }
        debug!(
            "Computing portfolio for {} transactions across {} assets in {}",
            transactions.len(),
            symbols.len(),
            self.quote_currency
        );

        let prices = if symbols.is_empty() {
            Default::default()
        } else {
            self.price_source
                .get_prices(&symbols, &self.quote_currency)
                .await?
        };

        Ok(compute_portfolio(&transactions, &prices))
    }
}
