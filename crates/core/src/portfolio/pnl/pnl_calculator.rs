use log::{debug, warn};
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::lots_model::LotQueue;
use super::pnl_model::{AssetPnl, PortfolioSummary, PortfolioTotals};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, QUANTITY_DECIMAL_PRECISION};
use crate::prices::PriceMap;
use crate::transactions::Transaction;
use crate::utils::decimal_utils::{round_half_away, safe_div};

/// Unrounded figures for one asset, kept so totals do not accumulate rounding error.
struct AssetFigures {
    market_value: Decimal,
    cost_basis: Decimal,
    unrealized: Decimal,
}

/// Computes FIFO cost basis, realized and unrealized PnL for every asset in
/// `transactions`, valued at `prices`.
///
/// Input order does not matter: each asset's transactions are replayed in
/// timestamp order, and transactions sharing a timestamp keep their input
/// order, and assets with equal market value are ordered by symbol. Symbols
/// missing from `prices` are valued at zero. Amounts too large for a decimal
/// never panic: the offending transaction is skipped and aggregates saturate.
pub fn compute_portfolio(transactions: &[Transaction], prices: &PriceMap) -> PortfolioSummary {
    if transactions.is_empty() {
        return PortfolioSummary::default();
    }

    let mut symbol_order: Vec<&str> = Vec::new();
    let mut by_symbol: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for tx in transactions {
        by_symbol
            .entry(tx.asset_symbol.as_str())
            .or_insert_with(|| {
                symbol_order.push(tx.asset_symbol.as_str());
                Vec::new()
            })
            .push(tx);
    }

    let mut rows: Vec<(AssetPnl, AssetFigures)> = Vec::with_capacity(symbol_order.len());
    for symbol in symbol_order {
        let Some(mut asset_txs) = by_symbol.remove(symbol) else {
            continue;
        };
        asset_txs.sort_by_key(|tx| tx.timestamp);
        let price = prices.get(symbol).copied().unwrap_or(Decimal::ZERO);
        rows.push(compute_asset(symbol, &asset_txs, price));
    }

    rows.sort_by(|(a, _), (b, _)| {
        b.market_value
            .cmp(&a.market_value)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let mut totals = PortfolioTotals::default();
    let mut assets = Vec::with_capacity(rows.len());
    for (asset, figures) in rows {
        totals.market_value = totals.market_value.saturating_add(figures.market_value);
        totals.total_cost_basis = totals.total_cost_basis.saturating_add(figures.cost_basis);
        totals.unrealized_pnl = totals.unrealized_pnl.saturating_add(figures.unrealized);
        totals.realized_pnl = totals.realized_pnl.saturating_add(asset.realized_pnl);
        assets.push(asset);
    }

    PortfolioSummary {
        assets,
        totals: PortfolioTotals {
            market_value: round_half_away(totals.market_value, DISPLAY_DECIMAL_PRECISION),
            total_cost_basis: round_half_away(totals.total_cost_basis, DISPLAY_DECIMAL_PRECISION),
            unrealized_pnl: round_half_away(totals.unrealized_pnl, DISPLAY_DECIMAL_PRECISION),
            realized_pnl: round_half_away(totals.realized_pnl, DISPLAY_DECIMAL_PRECISION),
        },
    }
}

/// Replays one asset's transactions, which must already be in time order.
fn compute_asset(symbol: &str, txs: &[&Transaction], price: Decimal) -> (AssetPnl, AssetFigures) {
    let mut lots = LotQueue::new();
    let mut realized = Decimal::ZERO;

    for tx in txs {
        if tx.quantity <= Decimal::ZERO {
            warn!(
                "Skipping transaction {} ({}) with non-positive quantity {}",
                tx.id,
                symbol,
                tx.quantity
            );
            continue;
        }
        if tx.transaction_type.is_acquisition() {
            lots.add_lot(tx.quantity, tx.price_per_unit, tx.fee_amt());
        } else if tx.transaction_type.is_disposal() {
            let gain = lots.dispose_fifo(tx.quantity, tx.price_per_unit, tx.fee_amt());
            realized = realized.saturating_add(gain);
        }
    }

    let quantity = lots.quantity();
    let cost_basis = lots.cost_basis();
    let market_value = quantity.saturating_mul(price);
    let unrealized = market_value.saturating_sub(cost_basis);
    let unrealized_pct = safe_div(unrealized, cost_basis).saturating_mul(Decimal::ONE_HUNDRED);

    debug!(
        "{}: {} transactions, {} open lots, held {}",
        symbol,
        txs.len(),
        lots.lots().len(),
        quantity
    );

    let dp = DISPLAY_DECIMAL_PRECISION;
    let asset = AssetPnl {
        symbol: symbol.to_string(),
        quantity_held: round_half_away(quantity, QUANTITY_DECIMAL_PRECISION),
        avg_cost_basis_per_unit: round_half_away(lots.average_cost(), dp),
        total_cost_basis: round_half_away(cost_basis, dp),
        market_price: round_half_away(price, dp),
        market_value: round_half_away(market_value, dp),
        unrealized_pnl: round_half_away(unrealized, dp),
        unrealized_pnl_percent: round_half_away(unrealized_pct, dp),
        realized_pnl: round_half_away(realized, dp),
    };

    (
        asset,
        AssetFigures {
            market_value,
            cost_basis,
            unrealized,
        },
    )
}
