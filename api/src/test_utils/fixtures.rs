//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.

use chrono::{DateTime, Utc};
use rust_decimal_macros::dec;

use crate::app::CreateTransactionCommand;
use crate::domain::entities::Transaction;

pub const ORIGIN_ACCOUNT: &str = "ACC-123456789";
pub const DESTINATION_ACCOUNT: &str = "ACC-987654321";

/// Create a pending USD transaction with the given id
pub fn test_transaction(id: &str) -> Transaction {
    test_transaction_at(id, Utc::now())
}

/// Create a pending USD transaction with a fixed creation time
pub fn test_transaction_at(id: &str, created_at: DateTime<Utc>) -> Transaction {
    Transaction::create(
        id,
        dec!(100.50),
        "USD",
        ORIGIN_ACCOUNT,
        DESTINATION_ACCOUNT,
        created_at,
    )
    .expect("fixture transaction is valid")
}

/// A command that passes every validation rule
pub fn create_command() -> CreateTransactionCommand {
    CreateTransactionCommand {
        amount: dec!(100.50),
        currency: "USD".to_string(),
        origin_account_number: ORIGIN_ACCOUNT.to_string(),
        destination_account_number: DESTINATION_ACCOUNT.to_string(),
    }
}
