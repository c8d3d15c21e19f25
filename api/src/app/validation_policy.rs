//! Transaction validation policy
//!
//! Business rules checked at the application boundary, on top of the invariants the
//! `Transaction` entity enforces itself. Account and currency formats reuse the entity's
//! rules so both layers accept exactly the same values.

use rust_decimal::Decimal;

use crate::domain::entities::{
    is_valid_account_charset, is_valid_currency_code, Transaction, ACCOUNT_NUMBER_MAX_LEN,
    ACCOUNT_NUMBER_MIN_LEN, CURRENCY_CODE_LEN,
};
use crate::error::DomainError;

/// Smallest amount accepted for a transaction (0.01)
pub const MIN_AMOUNT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Largest amount accepted for a transaction (1,000,000.00)
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

#[derive(Debug, Default, Clone, Copy)]
pub struct TransactionValidationPolicy;

impl TransactionValidationPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Apply every rule to an already constructed transaction
    pub fn validate(&self, transaction: &Transaction) -> Result<(), DomainError> {
        self.validate_amount(transaction.amount())?;
        self.validate_currency(transaction.currency())?;
        self.validate_account_number(transaction.origin_account_number())?;
        self.validate_account_number(transaction.destination_account_number())?;
        self.validate_different_accounts(
            transaction.origin_account_number(),
            transaction.destination_account_number(),
        )
    }

    pub fn validate_amount(&self, amount: Decimal) -> Result<(), DomainError> {
        if amount < MIN_AMOUNT {
            return Err(DomainError::Validation(format!(
                "Transaction amount must be at least {}",
                MIN_AMOUNT
            )));
        }
        if amount > MAX_AMOUNT {
            return Err(DomainError::Validation(format!(
                "Transaction amount cannot exceed {}",
                MAX_AMOUNT
            )));
        }
        Ok(())
    }

    pub fn validate_currency(&self, currency: &str) -> Result<(), DomainError> {
        if currency.trim().is_empty() {
            return Err(DomainError::Validation(
                "Currency code cannot be empty".to_string(),
            ));
        }
        if currency.chars().count() != CURRENCY_CODE_LEN {
            return Err(DomainError::Validation(format!(
                "Currency code must be exactly {} characters",
                CURRENCY_CODE_LEN
            )));
        }
        if !is_valid_currency_code(currency) {
            return Err(DomainError::Validation(
                "Currency code must contain only uppercase letters".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_account_number(&self, account_number: &str) -> Result<(), DomainError> {
        if account_number.trim().is_empty() {
            return Err(DomainError::Validation(
                "Account number cannot be empty".to_string(),
            ));
        }
        let len = account_number.chars().count();
        if !(ACCOUNT_NUMBER_MIN_LEN..=ACCOUNT_NUMBER_MAX_LEN).contains(&len) {
            return Err(DomainError::Validation(format!(
                "Account number must be between {} and {} characters",
                ACCOUNT_NUMBER_MIN_LEN, ACCOUNT_NUMBER_MAX_LEN
            )));
        }
        if !is_valid_account_charset(account_number) {
            return Err(DomainError::Validation(
                "Account number can only contain letters, numbers, and hyphens".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_different_accounts(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<(), DomainError> {
        if origin == destination {
            return Err(DomainError::Validation(
                "Origin and destination accounts must be different".to_string(),
            ));
        }
        Ok(())
    }
}
