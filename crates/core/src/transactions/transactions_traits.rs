use super::transactions_model::Transaction;
use crate::Result;
use async_trait::async_trait;

/// Contract for anything that can supply a user's transactions.
///
/// Implementations may read from storage, an exchange import or a file. The
/// returned records carry no ordering guarantee; the engine sorts them.
#[async_trait]
pub trait TransactionSourceTrait: Send + Sync {
    async fn get_transactions(&self) -> Result<Vec<Transaction>>;
}
