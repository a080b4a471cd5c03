mod config;
mod main_lib;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use config::Config;
use main_lib::{init_tracing, run, run_valuations, InputFormat, RunOptions};

#[derive(Parser)]
#[command(name = "coinfolio")]
#[command(about = "FIFO profit/loss report for a crypto transaction history", long_about = None)]
struct Cli {
    /// Transactions file (JSON)
    #[arg(required_unless_present = "balances")]
    transactions: Option<PathBuf>,

    /// Prices file: JSON object of symbol -> price. Fallback prices are used when omitted.
    prices: Option<PathBuf>,

    /// 24h ticker snapshot (JSON array), used instead of a prices file and by --balances
    #[arg(long, conflicts_with = "prices")]
    tickers: Option<PathBuf>,

    /// Value an exchange balances file (JSON array) against --tickers instead of a PnL report
    #[arg(long, requires = "tickers", conflicts_with_all = ["transactions", "prices"])]
    balances: Option<PathBuf>,

    /// Layout of the transactions file
    #[arg(long, value_enum, default_value_t = InputFormat::Transactions)]
    format: InputFormat,

    /// Quote currency, overrides COINFOLIO_QUOTE_CURRENCY
    #[arg(long)]
    quote: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_tracing(&config.log_format);
    let cli = Cli::parse();

    let output = if let Some(balances) = cli.balances.as_deref() {
        let tickers = cli
            .tickers
            .as_deref()
            .context("--balances needs a --tickers snapshot")?;
        let summary = run_valuations(balances, tickers, cli.quote.as_deref(), &config)?;
        serde_json::to_string_pretty(&summary)?
    } else if let Some(transactions) = cli.transactions {
        let options = RunOptions {
            transactions,
            prices: cli.prices,
            tickers: cli.tickers,
            format: cli.format,
            quote_currency: cli.quote,
        };
        serde_json::to_string_pretty(&run(&options, &config).await?)?
    } else {
        anyhow::bail!("Either a transactions file or --balances is required");
    };
    println!("{}", output);
    Ok(())
}
