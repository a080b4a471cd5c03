//! Normalization of Bitvavo account history into transactions.
//!
//! Only the record shape and the mapping live here. Fetching pages from
//! `/v2/account/history` (and signing those requests) belongs to the exchange
//! client, which is not part of this crate.

use log::{debug, warn};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transactions_constants::{EXTERNAL_ID_PREFIX, TRANSACTION_SOURCE_BITVAVO};
use super::transactions_errors::TransactionError;
use super::transactions_model::{parse_timestamp, NewTransaction, TransactionType};
use crate::utils::decimal_utils::{parse_decimal_string_tolerant, parse_optional_decimal};
use crate::Result;

/// One page of `/v2/account/history`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitvavoHistoryPage {
    #[serde(default)]
    pub items: Vec<BitvavoHistoryItem>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub max_items: u32,
}

/// A single history record. Amounts arrive as strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BitvavoHistoryItem {
    pub transaction_id: String,
    pub executed_at: String,

    #[serde(rename = "type")]
    pub tx_type: String,

    #[serde(default)]
    pub price_currency: Option<String>,
    #[serde(default)]
    pub price_amount: Option<String>,
    #[serde(default)]
    pub sent_currency: Option<String>,
    #[serde(default)]
    pub sent_amount: Option<String>,
    #[serde(default)]
    pub received_currency: Option<String>,
    #[serde(default)]
    pub received_amount: Option<String>,
    #[serde(default)]
    pub fees_currency: Option<String>,
    #[serde(default)]
    pub fees_amount: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl BitvavoHistoryItem {
    fn received(&self) -> Option<(&str, Decimal)> {
        let currency = non_empty(&self.received_currency)?;
        let amount = non_empty(&self.received_amount)?;
        Some((currency, parse_decimal_string_tolerant(amount, "receivedAmount")))
    }

    fn sent(&self) -> Option<(&str, Decimal)> {
        let currency = non_empty(&self.sent_currency)?;
        let amount = non_empty(&self.sent_amount)?;
        Some((currency, parse_decimal_string_tolerant(amount, "sentAmount")))
    }

    fn amount_of(value: &Option<String>, field: &str) -> Option<Decimal> {
        parse_optional_decimal(non_empty(value), field)
    }
}

/// Maps one history record to a transaction.
///
/// Returns `Ok(None)` for records that carry no position change
/// (cancelled withdrawals). Unknown record types become zero-cost
/// `TRANSFER_IN`s so the movement stays visible.
pub fn normalize_history_item(item: &BitvavoHistoryItem) -> Result<Option<NewTransaction>> {
    let action = item.tx_type.trim().to_lowercase();

    let executed_at = parse_timestamp(&item.executed_at).map_err(|e| {
        TransactionError::Normalization {
            item_id: item.transaction_id.clone(),
            reason: format!("bad executedAt: {}", e),
        }
    })?;

    let received_symbol = non_empty(&item.received_currency);
    let sent_symbol = non_empty(&item.sent_currency);
    let received_qty = BitvavoHistoryItem::amount_of(&item.received_amount, "receivedAmount");
    let sent_qty = BitvavoHistoryItem::amount_of(&item.sent_amount, "sentAmount");

    let (transaction_type, symbol, quantity) = match action.as_str() {
        "buy" => (TransactionType::Buy, received_symbol, received_qty),
        "sell" => (TransactionType::Sell, sent_symbol, sent_qty),
        "withdrawal_cancelled" => {
            debug!(
                "Skipping cancelled withdrawal {} from Bitvavo history",
                item.transaction_id
            );
            return Ok(None);
        }
        other => {
            let symbol = received_symbol.or(sent_symbol);
            let fallback_qty = received_qty.or(sent_qty);
            match other {
                "withdrawal" => (
                    TransactionType::TransferOut,
                    symbol,
                    item.sent().map(|(_, qty)| qty).or(fallback_qty),
                ),
                "deposit" => (
                    TransactionType::Deposit,
                    symbol,
                    received_qty.or(fallback_qty),
                ),
                "staking" | "fixed_staking" => (
                    TransactionType::StakingReward,
                    symbol,
                    received_qty.or(fallback_qty),
                ),
                "affiliate"
                | "distribution"
                | "rebate"
                | "loan"
                | "manually_assigned_bitvavo"
                | "external_transferred_funds" => (
                    TransactionType::TransferIn,
                    symbol,
                    received_qty.or(fallback_qty),
                ),
                "internal_transfer" => match item.received() {
                    Some((currency, qty)) => {
                        (TransactionType::TransferIn, Some(currency), Some(qty))
                    }
                    None => (TransactionType::TransferOut, symbol, sent_qty.or(fallback_qty)),
                },
                unknown => {
                    warn!(
                        "Unknown Bitvavo history type '{}' for {}. Treating as TRANSFER_IN.",
                        unknown, item.transaction_id
                    );
                    (TransactionType::TransferIn, symbol, fallback_qty)
                }
            }
        }
    };

    let symbol = symbol.ok_or_else(|| TransactionError::Normalization {
        item_id: item.transaction_id.clone(),
        reason: format!("no asset currency on '{}' record", action),
    })?;

    let price = BitvavoHistoryItem::amount_of(&item.price_amount, "priceAmount")
        .unwrap_or(Decimal::ZERO);
    let fee = BitvavoHistoryItem::amount_of(&item.fees_amount, "feesAmount")
        .unwrap_or(Decimal::ZERO);

    Ok(Some(NewTransaction {
        id: Some(format!("{}{}", EXTERNAL_ID_PREFIX, item.transaction_id)),
        asset_symbol: symbol.to_uppercase(),
        transaction_type: transaction_type.as_str().to_string(),
        quantity: Some(quantity.unwrap_or(Decimal::ZERO)),
        price_per_unit: Some(price),
        fee: Some(fee),
        timestamp: executed_at.to_rfc3339(),
        note: item.address.clone(),
        source: Some(TRANSACTION_SOURCE_BITVAVO.to_string()),
        external_id: Some(item.transaction_id.clone()),
    }))
}

/// Maps a batch of history records, skipping (and logging) the ones that fail.
pub fn normalize_history(items: &[BitvavoHistoryItem]) -> Vec<NewTransaction> {
    let mut normalized = Vec::with_capacity(items.len());
    for item in items {
        match normalize_history_item(item) {
            Ok(Some(tx)) => normalized.push(tx),
            Ok(None) => {}
            Err(e) => warn!("Skipping Bitvavo history item: {}", e),
        }
    }
    normalized
}
