//! Repository port traits
//!
//! These traits define the interface for data persistence.
//! Implementations are provided by adapters (e.g., the in-memory store).

use async_trait::async_trait;

use crate::domain::entities::Transaction;
use crate::error::DomainError;

/// Repository for Transaction entities
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Insert or replace a transaction, keyed by its id
    async fn save(&self, transaction: Transaction) -> Result<Transaction, DomainError>;

    /// Find a transaction by ID
    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, DomainError>;

    /// List transactions newest first (ties keep insertion order)
    ///
    /// `offset` and `offset + limit` are clamped to the number of stored
    /// transactions, so an offset past the end yields an empty list.
    async fn find_all(&self, offset: usize, limit: usize) -> Result<Vec<Transaction>, DomainError>;

    /// Total number of stored transactions
    async fn count(&self) -> Result<u64, DomainError>;

    /// Check whether a transaction with this ID exists
    async fn exists_by_id(&self, id: &str) -> Result<bool, DomainError>;
}
