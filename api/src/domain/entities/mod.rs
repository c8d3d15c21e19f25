//! Domain entities
//!
//! Pure domain models representing core business concepts.

pub mod transaction;

pub use transaction::{
    is_valid_account_charset, is_valid_currency_code, minor_units, Transaction, TransactionStatus,
    ACCOUNT_NUMBER_MAX_LEN, ACCOUNT_NUMBER_MIN_LEN, CURRENCY_CODE_LEN,
};
