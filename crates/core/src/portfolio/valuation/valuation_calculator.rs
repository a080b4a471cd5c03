use log::debug;
use rust_decimal::Decimal;
use std::collections::HashMap;

use super::valuation_model::{BalanceValuation, ExchangeBalance, ValuationSummary, ValuationTotals};
use crate::constants::{DISPLAY_DECIMAL_PRECISION, PRICE_DECIMAL_PRECISION};
use crate::prices::{market_code, Ticker24h};
use crate::utils::decimal_utils::{parse_decimal_string_tolerant, round_half_away, safe_div};

/// Values every non-empty balance in `quote_currency` using the 24h tickers.
///
/// Balances without a `SYMBOL-QUOTE` ticker are valued at zero. Valuations are
/// sorted by total value, largest first, then by symbol.
pub fn calculate_valuations(
    balances: &[ExchangeBalance],
    tickers: &[Ticker24h],
    quote_currency: &str,
) -> ValuationSummary {
    let quote = quote_currency.trim().to_uppercase();
    let ticker_map: HashMap<&str, &Ticker24h> =
        tickers.iter().map(|t| (t.market.as_str(), t)).collect();

    let mut valuations: Vec<BalanceValuation> = balances
        .iter()
        .filter_map(|balance| value_balance(balance, &ticker_map, &quote))
        .collect();

    valuations.sort_by(|a, b| {
        b.value_total
            .cmp(&a.value_total)
            .then_with(|| a.symbol.cmp(&b.symbol))
    });

    let mut totals = ValuationTotals::default();
    for v in &valuations {
        totals.value_available = totals.value_available.saturating_add(v.value_available);
        totals.value_in_order = totals.value_in_order.saturating_add(v.value_in_order);
        totals.value_total = totals.value_total.saturating_add(v.value_total);
    }
    totals.value_available = round_half_away(totals.value_available, DISPLAY_DECIMAL_PRECISION);
    totals.value_in_order = round_half_away(totals.value_in_order, DISPLAY_DECIMAL_PRECISION);
    totals.value_total = round_half_away(totals.value_total, DISPLAY_DECIMAL_PRECISION);

    debug!(
        "Valued {} of {} balances in {}",
        valuations.len(),
        balances.len(),
        quote
    );

    ValuationSummary {
        quote_currency: quote,
        valuations,
        totals,
    }
}

fn value_balance(
    balance: &ExchangeBalance,
    ticker_map: &HashMap<&str, &Ticker24h>,
    quote: &str,
) -> Option<BalanceValuation> {
    let available = parse_decimal_string_tolerant(&balance.available, "available");
    let in_order = parse_decimal_string_tolerant(&balance.in_order, "inOrder");
    if available <= Decimal::ZERO && in_order <= Decimal::ZERO {
        return None;
    }

    let mut price = Decimal::ZERO;
    let mut change = Decimal::ZERO;
    let mut change_pct = Decimal::ZERO;
    if balance.symbol.eq_ignore_ascii_case(quote) {
        price = Decimal::ONE;
    } else if let Some(ticker) = ticker_map.get(market_code(&balance.symbol, quote).as_str()) {
        let last = parse_decimal_string_tolerant(ticker.last.as_deref().unwrap_or_default(), "last");
        let open = parse_decimal_string_tolerant(ticker.open.as_deref().unwrap_or_default(), "open");
        price = last;
        change = last.saturating_sub(open);
        if open > Decimal::ZERO {
            change_pct = safe_div(change, open).saturating_mul(Decimal::ONE_HUNDRED);
        }
    } else {
        debug!("No {} ticker for balance {}", quote, balance.symbol);
    }

    let dp = DISPLAY_DECIMAL_PRECISION;
    Some(BalanceValuation {
        symbol: balance.symbol.clone(),
        available,
        in_order,
        price: round_half_away(price, PRICE_DECIMAL_PRECISION),
        change_24h: round_half_away(change, PRICE_DECIMAL_PRECISION),
        change_24h_pct: round_half_away(change_pct, dp),
        value_available: round_half_away(available.saturating_mul(price), dp),
        value_in_order: round_half_away(in_order.saturating_mul(price), dp),
        value_total: round_half_away(available.saturating_add(in_order).saturating_mul(price), dp),
    })
}
