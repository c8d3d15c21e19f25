//! Transaction domain entity
//!
//! Represents a financial movement between two accounts. A `Transaction` can only be
//! obtained through [`Transaction::create`], which validates every field, so any value
//! of this type upholds the invariants below:
//! - the id is non-empty and trimmed
//! - the amount is positive and fits the currency's minor units
//! - the currency is three uppercase letters
//! - both account numbers are 8-20 letters, digits or hyphens

use std::hash::{Hash, Hasher};
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

pub const ACCOUNT_NUMBER_MIN_LEN: usize = 8;
pub const ACCOUNT_NUMBER_MAX_LEN: usize = 20;
pub const CURRENCY_CODE_LEN: usize = 3;

static ACCOUNT_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9-]+$").expect("valid account number regex"));

static CURRENCY_CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}$").expect("valid currency regex"));

/// Check that an account number only uses letters, digits and hyphens
pub fn is_valid_account_charset(account_number: &str) -> bool {
    ACCOUNT_NUMBER_RE.is_match(account_number)
}

/// Check that a currency code is exactly three uppercase ASCII letters
pub fn is_valid_currency_code(code: &str) -> bool {
    CURRENCY_CODE_RE.is_match(code)
}

/// Number of decimal places a currency allows (ISO 4217 minor units)
pub fn minor_units(currency: &str) -> u32 {
    match currency {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "PYG" | "RWF" | "UGX"
        | "UYI" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        "CLF" | "UYW" => 4,
        _ => 2,
    }
}

/// Transaction lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Completed => write!(f, "COMPLETED"),
            TransactionStatus::Failed => write!(f, "FAILED"),
        }
    }
}

impl std::str::FromStr for TransactionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(TransactionStatus::Pending),
            "COMPLETED" => Ok(TransactionStatus::Completed),
            "FAILED" => Ok(TransactionStatus::Failed),
            _ => Err(format!("Unknown transaction status: {}", s)),
        }
    }
}

/// A validated, immutable financial transaction
///
/// Equality and hashing only consider the id.
#[derive(Debug, Clone)]
pub struct Transaction {
    id: String,
    amount: Decimal,
    currency: String,
    origin_account_number: String,
    destination_account_number: String,
    status: TransactionStatus,
    created_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new pending transaction, validating every field
    pub fn create(
        id: &str,
        amount: Decimal,
        currency: &str,
        origin_account_number: &str,
        destination_account_number: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let id = validate_id(id)?;
        validate_positive(amount)?;
        let currency = validate_currency(currency)?;
        let amount = validate_precision(amount, &currency)?;
        let origin_account_number =
            validate_account_number(origin_account_number, "Origin account number")?;
        let destination_account_number =
            validate_account_number(destination_account_number, "Destination account number")?;

        Ok(Self {
            id,
            amount,
            currency,
            origin_account_number,
            destination_account_number,
            status: TransactionStatus::Pending,
            created_at,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn origin_account_number(&self) -> &str {
        &self.origin_account_number
    }

    pub fn destination_account_number(&self) -> &str {
        &self.destination_account_number
    }

    pub fn status(&self) -> TransactionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mark the transaction as completed
    pub fn complete(self) -> Self {
        self.with_status(TransactionStatus::Completed)
    }

    /// Mark the transaction as failed
    pub fn fail(self) -> Self {
        self.with_status(TransactionStatus::Failed)
    }

    /// Completed and failed transactions are final
    pub fn is_final(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Completed | TransactionStatus::Failed
        )
    }

    // No guard against leaving a final state: FAILED -> COMPLETED is allowed.
    fn with_status(self, status: TransactionStatus) -> Self {
        if self.status == status {
            return self;
        }
        Self { status, ..self }
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

impl Hash for Transaction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

fn validate_id(id: &str) -> Result<String, DomainError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(DomainError::InvalidArgument(
            "Transaction ID cannot be empty".to_string(),
        ));
    }
    Ok(id.to_string())
}

fn validate_positive(amount: Decimal) -> Result<(), DomainError> {
    if amount <= Decimal::ZERO {
        return Err(DomainError::InvalidArgument(
            "Amount must be positive".to_string(),
        ));
    }
    Ok(())
}

fn validate_precision(amount: Decimal, currency: &str) -> Result<Decimal, DomainError> {
    let allowed = minor_units(currency);
    if amount.normalize().scale() > allowed {
        return Err(DomainError::InvalidArgument(format!(
            "Amount {} has more than {} decimal places allowed for {}",
            amount, allowed, currency
        )));
    }
    Ok(amount)
}

fn validate_currency(currency: &str) -> Result<String, DomainError> {
    let currency = currency.trim();
    if currency.is_empty() {
        return Err(DomainError::InvalidArgument(
            "Currency cannot be empty".to_string(),
        ));
    }
    let currency = currency.to_uppercase();
    if !is_valid_currency_code(&currency) {
        return Err(DomainError::InvalidArgument(format!(
            "Currency must be a {}-letter code",
            CURRENCY_CODE_LEN
        )));
    }
    Ok(currency)
}

fn validate_account_number(account_number: &str, field: &str) -> Result<String, DomainError> {
    let account_number = account_number.trim();
    if account_number.is_empty() {
        return Err(DomainError::InvalidArgument(format!("{} cannot be empty", field)));
    }
    let len = account_number.chars().count();
    if !(ACCOUNT_NUMBER_MIN_LEN..=ACCOUNT_NUMBER_MAX_LEN).contains(&len) {
        return Err(DomainError::InvalidArgument(format!(
            "{} must be between {} and {} characters",
            field, ACCOUNT_NUMBER_MIN_LEN, ACCOUNT_NUMBER_MAX_LEN
        )));
    }
    if !is_valid_account_charset(account_number) {
        return Err(DomainError::InvalidArgument(format!(
            "{} can only contain letters, numbers, and hyphens",
            field
        )));
    }
    Ok(account_number.to_string())
}
