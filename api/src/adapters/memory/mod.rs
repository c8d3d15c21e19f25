//! In-memory adapters
//!
//! Implementations of repository traits backed by process memory.
//! State does not survive a restart.

pub mod transaction_repo;

pub use transaction_repo::InMemoryTransactionRepository;
