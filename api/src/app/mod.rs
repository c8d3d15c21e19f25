//! Application layer
//!
//! Contains use cases and the rules they share.
//! Use cases coordinate between domain entities and ports.

pub mod create_transaction;
pub mod get_transaction;
pub mod list_transactions;
pub mod pagination;
pub mod validation_policy;

pub use create_transaction::{CreateTransactionCommand, CreateTransactionUseCase};
pub use get_transaction::GetTransactionUseCase;
pub use list_transactions::{ListTransactionsUseCase, TransactionQuery};
pub use pagination::{PageRequest, PageResponse};
pub use validation_policy::TransactionValidationPolicy;
