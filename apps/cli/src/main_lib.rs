use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use coinfolio_core::portfolio::pnl::PnlService;
use coinfolio_core::portfolio::valuation::{calculate_valuations, ExchangeBalance, ValuationSummary};
use coinfolio_core::prices::{PriceSourceTrait, StaticPriceSource, Ticker24h, TickerPriceSource};
use coinfolio_core::transactions::{
    normalize_history, BitvavoHistoryItem, BitvavoHistoryPage, InMemoryTransactionSource,
};
use coinfolio_core::PortfolioSummary;

use crate::config::Config;

/// Layout of the transactions file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON array of transaction objects
    Transactions,
    /// Bitvavo account history export (a page object or an array of items)
    Bitvavo,
}

pub struct RunOptions {
    pub transactions: PathBuf,
    pub prices: Option<PathBuf>,
    pub tickers: Option<PathBuf>,
    pub format: InputFormat,
    pub quote_currency: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum HistoryFile {
    Items(Vec<BitvavoHistoryItem>),
    Page(BitvavoHistoryPage),
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_line_number(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn load_transaction_source(
    path: &Path,
    format: InputFormat,
) -> anyhow::Result<InMemoryTransactionSource> {
    let json = read_file(path)?;
    let source = match format {
        InputFormat::Transactions => InMemoryTransactionSource::from_json(&json)
            .with_context(|| format!("Invalid transactions in {}", path.display()))?,
        InputFormat::Bitvavo => {
            let items = match serde_json::from_str::<HistoryFile>(&json)
                .with_context(|| format!("Invalid Bitvavo history in {}", path.display()))?
            {
                HistoryFile::Items(items) => items,
                HistoryFile::Page(page) => page.items,
            };
            let transactions = normalize_history(&items)
                .into_iter()
                .filter_map(|new_tx| {
                    let id = new_tx.id.clone().unwrap_or_default();
                    match new_tx.into_transaction() {
                        Ok(tx) => Some(tx),
                        Err(e) => {
                            tracing::warn!("Skipping Bitvavo record {}: {}", id, e);
                            None
                        }
                    }
                })
                .collect();
            InMemoryTransactionSource::new(transactions)
        }
    };
    tracing::info!(
        "Loaded {} transactions from {}",
        source.len(),
        path.display()
    );
    Ok(source)
}

pub fn load_price_source(
    prices: Option<&Path>,
    tickers: Option<&Path>,
) -> anyhow::Result<Arc<dyn PriceSourceTrait>> {
    if let Some(path) = tickers {
        let tickers: Vec<Ticker24h> = serde_json::from_str(&read_file(path)?)
            .with_context(|| format!("Invalid tickers in {}", path.display()))?;
        return Ok(Arc::new(TickerPriceSource::new(tickers)));
    }
    match prices {
        Some(path) => {
            let source = StaticPriceSource::from_json(&read_file(path)?)
                .with_context(|| format!("Invalid prices in {}", path.display()))?;
            Ok(Arc::new(source))
        }
        None => {
            tracing::info!("No price file given, using fallback prices");
            Ok(Arc::new(StaticPriceSource::fallback()))
        }
    }
}

fn resolve_quote_currency(quote_currency: Option<&str>, config: &Config) -> String {
    quote_currency
        .map(str::to_uppercase)
        .unwrap_or_else(|| config.quote_currency.clone())
}

pub async fn run(options: &RunOptions, config: &Config) -> anyhow::Result<PortfolioSummary> {
    let transactions = load_transaction_source(&options.transactions, options.format)?;
    let prices = load_price_source(options.prices.as_deref(), options.tickers.as_deref())?;
    let quote_currency = resolve_quote_currency(options.quote_currency.as_deref(), config);

    let service = PnlService::new(Arc::new(transactions), prices, quote_currency);
    let summary = service.get_portfolio_summary().await?;
    Ok(summary)
}

/// Values exchange balances against a 24h ticker snapshot.
pub fn run_valuations(
    balances: &Path,
    tickers: &Path,
    quote_currency: Option<&str>,
    config: &Config,
) -> anyhow::Result<ValuationSummary> {
    let balance_list: Vec<ExchangeBalance> = serde_json::from_str(&read_file(balances)?)
        .with_context(|| format!("Invalid balances in {}", balances.display()))?;
    let ticker_list: Vec<Ticker24h> = serde_json::from_str(&read_file(tickers)?)
        .with_context(|| format!("Invalid tickers in {}", tickers.display()))?;
    let quote_currency = resolve_quote_currency(quote_currency, config);

    tracing::info!(
        "Valuing {} balances against {} tickers in {}",
        balance_list.len(),
        ticker_list.len(),
        quote_currency
    );
    Ok(calculate_valuations(&balance_list, &ticker_list, &quote_currency))
}
