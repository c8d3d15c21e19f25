//! In-memory adapter for TransactionRepository

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::entities::Transaction;
use crate::domain::ports::TransactionRepository;
use crate::error::DomainError;

struct Stored {
    /// Order of first insertion, used to break `created_at` ties
    seq: u64,
    transaction: Transaction,
}

#[derive(Default)]
struct Store {
    entries: HashMap<String, Stored>,
    next_seq: u64,
}

/// Map-backed implementation of TransactionRepository
///
/// Saves are last-writer-wins per id. Listing sorts a full snapshot on every call.
#[derive(Default)]
pub struct InMemoryTransactionRepository {
    store: RwLock<Store>,
}

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Internal("transaction store lock poisoned".to_string())
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, DomainError> {
        self.store.read().map_err(poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, DomainError> {
        self.store.write().map_err(poisoned)
    }

    /// Remove every stored transaction
    pub fn clear(&self) -> Result<(), DomainError> {
        let mut store = self.write()?;
        store.entries.clear();
        Ok(())
    }

    /// Number of stored transactions
    pub fn len(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool, DomainError> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    async fn save(&self, transaction: Transaction) -> Result<Transaction, DomainError> {
        let mut store = self.write()?;
        let Store { entries, next_seq } = &mut *store;

        match entries.entry(transaction.id().to_string()) {
            Entry::Occupied(mut occupied) => {
                tracing::debug!(id = %transaction.id(), "Replacing stored transaction");
                occupied.get_mut().transaction = transaction.clone();
            }
            Entry::Vacant(vacant) => {
                vacant.insert(Stored {
                    seq: *next_seq,
                    transaction: transaction.clone(),
                });
                *next_seq += 1;
            }
        }

        Ok(transaction)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, DomainError> {
        let store = self.read()?;
        Ok(store.entries.get(id).map(|e| e.transaction.clone()))
    }

    async fn find_all(&self, offset: usize, limit: usize) -> Result<Vec<Transaction>, DomainError> {
        let mut snapshot: Vec<(u64, Transaction)> = {
            let store = self.read()?;
            store
                .entries
                .values()
                .map(|e| (e.seq, e.transaction.clone()))
                .collect()
        };

        snapshot.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| seq_a.cmp(seq_b))
        });

        let start = offset.min(snapshot.len());
        let end = offset.saturating_add(limit).min(snapshot.len());

        Ok(snapshot
            .into_iter()
            .skip(start)
            .take(end - start)
            .map(|(_, tx)| tx)
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        Ok(self.read()?.entries.len() as u64)
    }

    async fn exists_by_id(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.read()?.entries.contains_key(id))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    use super::*;
    use crate::test_utils::{test_transaction, test_transaction_at};

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|t| t.id()).collect()
    }

    /// Five transactions, tx-0 oldest and tx-4 newest
    async fn seeded_repo() -> InMemoryTransactionRepository {
        let repo = InMemoryTransactionRepository::new();
        let base = Utc::now();
        for i in 0..5 {
            repo.save(test_transaction_at(
                &format!("tx-{}", i),
                base + Duration::seconds(i),
            ))
            .await
            .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn save_and_find_by_id() {
        let repo = InMemoryTransactionRepository::new();
        let tx = test_transaction("tx-1");

        let saved = repo.save(tx.clone()).await.unwrap();
        assert_eq!(saved, tx);

        let found = repo.find_by_id("tx-1").await.unwrap().unwrap();
        assert_eq!(found.amount(), tx.amount());
        assert!(repo.find_by_id("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_replaces_existing_id() {
        let repo = InMemoryTransactionRepository::new();
        repo.save(test_transaction("tx-1")).await.unwrap();

        let completed = test_transaction("tx-1").complete();
        repo.save(completed).await.unwrap();

        assert_eq!(repo.count().await.unwrap(), 1);
        let found = repo.find_by_id("tx-1").await.unwrap().unwrap();
        assert!(found.is_final());
    }

    #[tokio::test]
    async fn find_all_returns_newest_first() {
        let repo = seeded_repo().await;

        let page = repo.find_all(0, 2).await.unwrap();
        assert_eq!(ids(&page), vec!["tx-4", "tx-3"]);

        let page = repo.find_all(2, 2).await.unwrap();
        assert_eq!(ids(&page), vec!["tx-2", "tx-1"]);

        let page = repo.find_all(4, 2).await.unwrap();
        assert_eq!(ids(&page), vec!["tx-0"]);
    }

    #[tokio::test]
    async fn find_all_past_the_end_is_empty() {
        let repo = seeded_repo().await;

        assert!(repo.find_all(10, 2).await.unwrap().is_empty());
        assert!(repo.find_all(5, 1).await.unwrap().is_empty());
        assert!(repo.find_all(usize::MAX, usize::MAX).await.unwrap().is_empty());
        assert_eq!(repo.find_all(3, usize::MAX).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn find_all_breaks_ties_by_insertion_order() {
        let repo = InMemoryTransactionRepository::new();
        let at = Utc::now();
        for id in ["first", "second", "third"] {
            repo.save(test_transaction_at(id, at)).await.unwrap();
        }
        // Re-saving keeps the original position
        repo.save(test_transaction_at("first", at)).await.unwrap();

        let all = repo.find_all(0, 10).await.unwrap();
        assert_eq!(ids(&all), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn count_and_exists() {
        let repo = seeded_repo().await;

        assert_eq!(repo.count().await.unwrap(), 5);
        assert!(repo.exists_by_id("tx-3").await.unwrap());
        assert!(!repo.exists_by_id("tx-9").await.unwrap());
    }

    #[tokio::test]
    async fn clear_empties_the_store() {
        let repo = seeded_repo().await;
        assert_eq!(repo.len().unwrap(), 5);

        repo.clear().unwrap();
        assert!(repo.is_empty().unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn concurrent_saves_are_all_visible() {
        let repo = Arc::new(InMemoryTransactionRepository::new());

        let handles: Vec<_> = (0..32)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    let tx = Transaction::create(
                        &format!("tx-{}", i),
                        dec!(1.00),
                        "USD",
                        "ACC-123456789",
                        "ACC-987654321",
                        Utc::now(),
                    )
                    .unwrap();
                    repo.save(tx).await.unwrap();
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(repo.count().await.unwrap(), 32);
        assert_eq!(repo.find_all(0, 100).await.unwrap().len(), 32);
    }
}
