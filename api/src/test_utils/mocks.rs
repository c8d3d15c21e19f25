//! Mock implementations of port traits
//!
//! The in-memory repository adapter doubles as the happy-path test store; the
//! types here cover deterministic ids and failure paths.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::domain::entities::Transaction;
use crate::domain::ports::{IdGenerator, TransactionRepository};
use crate::error::DomainError;

// ============================================================================
// Id generators
// ============================================================================

/// Hands out `tx-1`, `tx-2`, ...
#[derive(Default)]
pub struct SequentialIdGenerator {
    next: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        format!("tx-{}", n)
    }
}

/// Always returns the same id
pub struct FixedIdGenerator {
    id: String,
}

impl FixedIdGenerator {
    pub fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl IdGenerator for FixedIdGenerator {
    fn generate_id(&self) -> String {
        self.id.clone()
    }
}

// ============================================================================
// Failing repository
// ============================================================================

/// Repository whose every call fails with an internal error
pub struct FailingTransactionRepository;

fn storage_down() -> DomainError {
    DomainError::Internal("storage unavailable".to_string())
}

#[async_trait]
impl TransactionRepository for FailingTransactionRepository {
    async fn save(&self, _transaction: Transaction) -> Result<Transaction, DomainError> {
        Err(storage_down())
    }

    async fn find_by_id(&self, _id: &str) -> Result<Option<Transaction>, DomainError> {
        Err(storage_down())
    }

    async fn find_all(&self, _offset: usize, _limit: usize) -> Result<Vec<Transaction>, DomainError> {
        Err(storage_down())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Err(storage_down())
    }

    async fn exists_by_id(&self, _id: &str) -> Result<bool, DomainError> {
        Err(storage_down())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential_ids_increment() {
        let generator = SequentialIdGenerator::new();
        assert_eq!(generator.generate_id(), "tx-1");
        assert_eq!(generator.generate_id(), "tx-2");
    }

    #[test]
    fn fixed_id_repeats() {
        let generator = FixedIdGenerator::new("same");
        assert_eq!(generator.generate_id(), generator.generate_id());
    }
}
