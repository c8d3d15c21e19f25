//! List transactions use case
//!
//! Offset/limit listing with lenient bounds, plus page-based listing.

use std::sync::Arc;

use crate::app::pagination::{PageRequest, PageResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::entities::Transaction;
use crate::domain::ports::TransactionRepository;
use crate::error::AppError;

/// Offset/limit window over the transaction list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionQuery {
    pub offset: i64,
    pub limit: i64,
}

impl TransactionQuery {
    pub fn new(offset: i64, limit: i64) -> Self {
        Self { offset, limit }
    }

    pub fn with_limit(limit: i64) -> Self {
        Self { offset: 0, limit }
    }
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: i64::from(DEFAULT_PAGE_SIZE),
        }
    }
}

pub struct ListTransactionsUseCase<TR>
where
    TR: TransactionRepository,
{
    transactions: Arc<TR>,
}

impl<TR> ListTransactionsUseCase<TR>
where
    TR: TransactionRepository,
{
    pub fn new(transactions: Arc<TR>) -> Self {
        Self { transactions }
    }

    /// List newest first; offset is clamped to >= 0 and limit to 1..=100
    pub async fn execute(&self, query: TransactionQuery) -> Result<Vec<Transaction>, AppError> {
        let offset = usize::try_from(query.offset.max(0)).unwrap_or(usize::MAX);
        let limit = query.limit.clamp(1, i64::from(MAX_PAGE_SIZE)) as usize;

        Ok(self.transactions.find_all(offset, limit).await?)
    }

    /// Total number of transactions
    pub async fn total_count(&self) -> Result<u64, AppError> {
        Ok(self.transactions.count().await?)
    }

    /// One page of transactions with navigation metadata
    pub async fn execute_page(
        &self,
        request: PageRequest,
    ) -> Result<PageResponse<Transaction>, AppError> {
        let content = self
            .transactions
            .find_all(request.offset(), request.size() as usize)
            .await?;
        let total = self.transactions.count().await?;

        Ok(PageResponse::of(content, &request, total))
    }
}
