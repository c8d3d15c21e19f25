//! Get transaction use case

use std::sync::Arc;

use crate::domain::entities::Transaction;
use crate::domain::ports::TransactionRepository;
use crate::error::{AppError, DomainError};

pub struct GetTransactionUseCase<TR>
where
    TR: TransactionRepository,
{
    transactions: Arc<TR>,
}

impl<TR> GetTransactionUseCase<TR>
where
    TR: TransactionRepository,
{
    pub fn new(transactions: Arc<TR>) -> Self {
        Self { transactions }
    }

    /// Fetch a transaction, failing with `TransactionNotFound` when it does not exist
    pub async fn execute(&self, id: &str) -> Result<Transaction, AppError> {
        self.transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::TransactionNotFound(id.to_string()).into())
    }
}
