//! Transactions module - domain models, sources and exchange normalization.

mod bitvavo_mapping;
mod in_memory_source;
mod transactions_constants;
mod transactions_errors;
mod transactions_model;
mod transactions_traits;


#[cfg(test)]
mod bitvavo_mapping_tests;

pub use bitvavo_mapping::{
    normalize_history, normalize_history_item, BitvavoHistoryItem, BitvavoHistoryPage,
};
pub use in_memory_source::InMemoryTransactionSource;
pub use transactions_constants::*;
pub use transactions_errors::TransactionError;
pub use transactions_model::{parse_timestamp, NewTransaction, Transaction, TransactionType};
pub use transactions_traits::TransactionSourceTrait;
