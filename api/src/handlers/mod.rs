//! HTTP handlers
//!
//! Axum request handlers for the API endpoints.

pub mod transactions;

pub use transactions::{create_transaction, get_transaction, list_transaction_pages, list_transactions};
