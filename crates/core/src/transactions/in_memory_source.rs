use super::transactions_model::{NewTransaction, Transaction};
use super::transactions_traits::TransactionSourceTrait;
use crate::Result;
use async_trait::async_trait;
use log::debug;

/// Transaction source backed by an owned list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTransactionSource {
    transactions: Vec<Transaction>,
}

impl InMemoryTransactionSource {
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    /// Validates every input record. The first invalid record fails the whole batch.
    pub fn from_new(new_transactions: Vec<NewTransaction>) -> Result<Self> {
        let transactions = new_transactions
            .into_iter()
            .map(NewTransaction::into_transaction)
            .collect::<Result<Vec<_>>>()?;
        debug!("Loaded {} transactions into memory", transactions.len());
        Ok(Self { transactions })
    }

    /// Parses a JSON array of [`NewTransaction`] objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let new_transactions: Vec<NewTransaction> = serde_json::from_str(json)?;
        Self::from_new(new_transactions)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[async_trait]
impl TransactionSourceTrait for InMemoryTransactionSource {
    async fn get_transactions(&self) -> Result<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }
}
