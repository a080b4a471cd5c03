//! Transaction domain models.

use crate::errors::{Result, ValidationError};
use crate::transactions::transactions_constants::TRANSACTION_SOURCE_MANUAL;
use crate::transactions::transactions_errors::TransactionError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Enum representing the supported transaction types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Buy,
    Sell,
    TransferIn,
    TransferOut,
    Deposit,
    StakingReward,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        use crate::transactions::transactions_constants::*;
        match self {
            TransactionType::Buy => TRANSACTION_TYPE_BUY,
            TransactionType::Sell => TRANSACTION_TYPE_SELL,
            TransactionType::TransferIn => TRANSACTION_TYPE_TRANSFER_IN,
            TransactionType::TransferOut => TRANSACTION_TYPE_TRANSFER_OUT,
            TransactionType::Deposit => TRANSACTION_TYPE_DEPOSIT,
            TransactionType::StakingReward => TRANSACTION_TYPE_STAKING_REWARD,
        }
    }

    /// Acquisitions open a new lot at `quantity * price + fee`.
    pub fn is_acquisition(&self) -> bool {
        matches!(
            self,
            TransactionType::Buy
                | TransactionType::TransferIn
                | TransactionType::Deposit
                | TransactionType::StakingReward
        )
    }

    /// Disposals consume lots FIFO and book realized PnL.
    pub fn is_disposal(&self) -> bool {
        matches!(self, TransactionType::Sell | TransactionType::TransferOut)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use crate::transactions::transactions_constants::*;
        match s.trim().to_uppercase().as_str() {
            TRANSACTION_TYPE_BUY => Ok(TransactionType::Buy),
            TRANSACTION_TYPE_SELL => Ok(TransactionType::Sell),
            TRANSACTION_TYPE_TRANSFER_IN => Ok(TransactionType::TransferIn),
            TRANSACTION_TYPE_TRANSFER_OUT => Ok(TransactionType::TransferOut),
            TRANSACTION_TYPE_DEPOSIT => Ok(TransactionType::Deposit),
            TRANSACTION_TYPE_STAKING_REWARD => Ok(TransactionType::StakingReward),
            _ => Err(TransactionError::UnsupportedType(s.to_string())),
        }
    }
}

/// A validated asset transaction, as consumed by the PnL engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Grouping key for the engine (e.g. "BTC"). Compared as-is.
    pub asset_symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub quantity: Decimal,
    /// Quote currency per unit at the time of the transaction.
    pub price_per_unit: Decimal,
    /// Quote currency, defaults to zero when absent.
    #[serde(default)]
    pub fee: Option<Decimal>,
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,

    // Provenance, ignored by the engine
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl Transaction {
    /// Get fee, defaulting to zero if not set
    pub fn fee_amt(&self) -> Decimal {
        self.fee.unwrap_or(Decimal::ZERO)
    }
}

/// Input model for a transaction entering the system (manual entry or exchange import).
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub id: Option<String>,
    pub asset_symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: String,
    #[serde(
        default,
        deserialize_with = "decimal_input_format::deserialize_option_decimal"
    )]
    pub quantity: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "decimal_input_format::deserialize_option_decimal"
    )]
    pub price_per_unit: Option<Decimal>,
    #[serde(
        default,
        deserialize_with = "decimal_input_format::deserialize_option_decimal"
    )]
    pub fee: Option<Decimal>,
    /// RFC3339, `YYYY-MM-DDTHH:MM:SS` (UTC), `YYYY-MM-DD` or epoch milliseconds.
    #[serde(deserialize_with = "timestamp_input_format::deserialize")]
    pub timestamp: String,
    pub note: Option<String>,
    pub source: Option<String>,
    pub external_id: Option<String>,
}

impl NewTransaction {
    /// Validates the new transaction data
    pub fn validate(&self) -> Result<()> {
        if self.asset_symbol.trim().is_empty() {
            return Err(
                TransactionError::InvalidData("Asset symbol cannot be empty".to_string()).into(),
            );
        }
        TransactionType::from_str(&self.transaction_type)?;

        let quantity = self
            .quantity
            .ok_or_else(|| ValidationError::MissingField("quantity".to_string()))?;
        if quantity <= Decimal::ZERO {
            return Err(TransactionError::InvalidData(format!(
                "Quantity must be positive, got {}",
                quantity
            ))
            .into());
        }

        let price = self
            .price_per_unit
            .ok_or_else(|| ValidationError::MissingField("pricePerUnit".to_string()))?;
        if price.is_sign_negative() && !price.is_zero() {
            return Err(TransactionError::InvalidData(format!(
                "Price per unit cannot be negative, got {}",
                price
            ))
            .into());
        }

        if let Some(fee) = self.fee {
            if fee.is_sign_negative() && !fee.is_zero() {
                return Err(TransactionError::InvalidData(format!(
                    "Fee cannot be negative, got {}",
                    fee
                ))
                .into());
            }
        }

        parse_timestamp(&self.timestamp)?;
        Ok(())
    }

    /// Validates and converts into an engine transaction.
    /// The symbol is trimmed and upper-cased, the fee defaults to zero and a
    /// UUID is assigned when no id was supplied. Records without a source are
    /// labelled as manual entries.
    pub fn into_transaction(self) -> Result<Transaction> {
        self.validate()?;
        let transaction_type = TransactionType::from_str(&self.transaction_type)?;
        let timestamp = parse_timestamp(&self.timestamp)?;

        Ok(Transaction {
            id: self
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            asset_symbol: self.asset_symbol.trim().to_uppercase(),
            transaction_type,
            quantity: self.quantity.unwrap_or(Decimal::ZERO),
            price_per_unit: self.price_per_unit.unwrap_or(Decimal::ZERO),
            fee: Some(self.fee.unwrap_or(Decimal::ZERO)),
            timestamp,
            source: Some(
                self.source
                    .unwrap_or_else(|| TRANSACTION_SOURCE_MANUAL.to_string()),
            ),
            external_id: self.external_id,
            note: self.note,
        })
    }
}

/// Parses the timestamp formats accepted at the boundary.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(Utc.from_utc_datetime(&naive));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return Ok(Utc.from_utc_datetime(&midnight));
        }
    }
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        if let Some(dt) = trimmed
            .parse::<i64>()
            .ok()
            .and_then(DateTime::from_timestamp_millis)
        {
            return Ok(dt);
        }
    }

    Err(TransactionError::InvalidData(format!(
        "Invalid timestamp '{}'. Expected RFC3339, YYYY-MM-DD or epoch milliseconds",
        value
    ))
    .into())
}

// Custom serialization for timestamps to ensure consistent ISO 8601 formatting
mod timestamp_format {
    use chrono::{DateTime, Utc};
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_timestamp(&s).map_err(serde::de::Error::custom)
    }
}

// Timestamps on input may arrive as strings or as epoch-millisecond numbers
mod timestamp_input_format {
    use serde::{self, Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TimestampInput {
        String(String),
        Millis(i64),
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match TimestampInput::deserialize(deserializer)? {
            TimestampInput::String(s) => s,
            TimestampInput::Millis(ms) => ms.to_string(),
        })
    }
}

// Custom deserialization for Decimal inputs to support strings, numbers, nulls, and scientific notation
mod decimal_input_format {
    use rust_decimal::Decimal;
    use serde::{self, Deserialize, Deserializer};
    use serde_json::Number;
    use std::str::FromStr;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DecimalInput {
        String(String),
        Number(Number),
        Null,
    }

    fn parse_decimal_value(value: &str) -> Result<Decimal, String> {
        let trimmed = value.trim();
        Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|e| format!("Invalid decimal value '{}': {}", value, e))
    }

    pub fn deserialize_option_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<DecimalInput>::deserialize(deserializer)?;
        match raw {
            None | Some(DecimalInput::Null) => Ok(None),
            Some(DecimalInput::String(s)) => {
                if s.trim().is_empty() {
                    return Ok(None);
                }
                parse_decimal_value(&s)
                    .map(Some)
                    .map_err(serde::de::Error::custom)
            }
            Some(DecimalInput::Number(n)) => parse_decimal_value(&n.to_string())
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
