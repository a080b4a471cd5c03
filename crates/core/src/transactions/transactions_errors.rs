use thiserror::Error;

/// Errors raised while validating or normalizing transactions.
#[derive(Error, Debug)]
pub enum TransactionError {
    #[error("Invalid transaction data: {0}")]
    InvalidData(String),

    #[error("Unsupported transaction type: {0}")]
    UnsupportedType(String),

    #[error("Failed to normalize exchange history item {item_id}: {reason}")]
    Normalization { item_id: String, reason: String },
}
