//! Transaction handlers
//!
//! Endpoints for creating, fetching and listing transactions.

use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, StatusCode},
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::app::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::app::validation_policy::MIN_AMOUNT;
use crate::app::{CreateTransactionCommand, PageRequest, PageResponse, TransactionQuery};
use crate::domain::entities::{
    Transaction, TransactionStatus, ACCOUNT_NUMBER_MAX_LEN, ACCOUNT_NUMBER_MIN_LEN,
    CURRENCY_CODE_LEN,
};
use crate::error::AppError;
use crate::{AppState, TRANSACTIONS_PATH};

/// Request body for creating a transaction
///
/// Fields are optional so that missing values are reported as violations
/// instead of a generic deserialization failure.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransactionRequest {
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub origin_account_number: Option<String>,
    pub destination_account_number: Option<String>,
}

impl CreateTransactionRequest {
    /// Check request-level constraints and build the use case command
    pub fn into_command(self) -> Result<CreateTransactionCommand, AppError> {
        let mut violations = BTreeMap::new();

        match self.amount {
            None => {
                violations.insert("amount".to_string(), "Amount is required".to_string());
            }
            Some(amount) if amount < MIN_AMOUNT => {
                violations.insert(
                    "amount".to_string(),
                    format!("Amount must be at least {}", MIN_AMOUNT),
                );
            }
            Some(_) => {}
        }

        match self.currency.as_deref().map(str::trim) {
            None | Some("") => {
                violations.insert("currency".to_string(), "Currency is required".to_string());
            }
            Some(currency) if currency.chars().count() != CURRENCY_CODE_LEN => {
                violations.insert(
                    "currency".to_string(),
                    format!("Currency must be exactly {} characters", CURRENCY_CODE_LEN),
                );
            }
            Some(_) => {}
        }

        check_account(
            &mut violations,
            "originAccountNumber",
            "Origin account number",
            self.origin_account_number.as_deref(),
        );
        check_account(
            &mut violations,
            "destinationAccountNumber",
            "Destination account number",
            self.destination_account_number.as_deref(),
        );

        match (
            self.amount,
            self.currency,
            self.origin_account_number,
            self.destination_account_number,
        ) {
            (Some(amount), Some(currency), Some(origin), Some(destination))
                if violations.is_empty() =>
            {
                Ok(CreateTransactionCommand {
                    amount,
                    currency,
                    origin_account_number: origin,
                    destination_account_number: destination,
                })
            }
            _ => Err(AppError::violations(violations)),
        }
    }
}

fn check_account(
    violations: &mut BTreeMap<String, String>,
    field: &str,
    label: &str,
    value: Option<&str>,
) {
    match value.map(str::trim) {
        None | Some("") => {
            violations.insert(field.to_string(), format!("{} is required", label));
        }
        Some(account) => {
            let len = account.chars().count();
            if !(ACCOUNT_NUMBER_MIN_LEN..=ACCOUNT_NUMBER_MAX_LEN).contains(&len) {
                violations.insert(
                    field.to_string(),
                    format!(
                        "{} must be between {} and {} characters",
                        label, ACCOUNT_NUMBER_MIN_LEN, ACCOUNT_NUMBER_MAX_LEN
                    ),
                );
            }
        }
    }
}

/// Transaction as returned by the API
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: String,
    /// JSON number carrying the scale it was created with
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
    pub currency: String,
    pub origin_account_number: String,
    pub destination_account_number: String,
    pub status: TransactionStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(tx: Transaction) -> Self {
        Self {
            id: tx.id().to_string(),
            amount: tx.amount(),
            currency: tx.currency().to_string(),
            origin_account_number: tx.origin_account_number().to_string(),
            destination_account_number: tx.destination_account_number().to_string(),
            status: tx.status(),
            created_at: tx.created_at(),
        }
    }
}

/// Query parameters for listing transactions
#[derive(Debug, Deserialize)]
pub struct ListTransactionsQuery {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    i64::from(DEFAULT_PAGE_SIZE)
}

/// Response for listing transactions
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
    pub total: u64,
    pub offset: i64,
    pub limit: i64,
    pub has_next: bool,
}

impl TransactionListResponse {
    pub fn of(transactions: Vec<TransactionResponse>, total: u64, offset: i64, limit: i64) -> Self {
        let has_next = u64::try_from(offset.saturating_add(limit))
            .map(|end| end < total)
            .unwrap_or(false);

        Self {
            transactions,
            total,
            offset,
            limit,
            has_next,
        }
    }
}

/// Query parameters for page-based listing
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub size: i64,
}

/// POST /api/v1/transactions
///
/// Create a new pending transaction.
pub async fn create_transaction(
    State(state): State<AppState>,
    body: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<TransactionResponse>), AppError>
{
    let Json(request) = body.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let command = request.into_command()?;

    let transaction = state.create_transaction.execute(command).await?;
    let location = format!("{}/{}", TRANSACTIONS_PATH, transaction.id());

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(transaction.into()),
    ))
}

/// GET /api/v1/transactions/:id
///
/// Get a transaction by id.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TransactionResponse>, AppError> {
    let transaction = state.get_transaction.execute(&id).await?;
    Ok(Json(transaction.into()))
}

/// GET /api/v1/transactions
///
/// List transactions newest first using offset/limit.
pub async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListTransactionsQuery>, QueryRejection>,
) -> Result<Json<TransactionListResponse>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut violations = BTreeMap::new();
    if query.offset < 0 {
        violations.insert(
            "offset".to_string(),
            "Offset must be greater than or equal to 0".to_string(),
        );
    }
    if !(1..=i64::from(MAX_PAGE_SIZE)).contains(&query.limit) {
        violations.insert(
            "limit".to_string(),
            format!("Limit must be between 1 and {}", MAX_PAGE_SIZE),
        );
    }
    if !violations.is_empty() {
        return Err(AppError::violations(violations));
    }

    let transactions = state
        .list_transactions
        .execute(TransactionQuery::new(query.offset, query.limit))
        .await?;
    let total = state.list_transactions.total_count().await?;

    let responses: Vec<TransactionResponse> =
        transactions.into_iter().map(TransactionResponse::from).collect();

    Ok(Json(TransactionListResponse::of(
        responses,
        total,
        query.offset,
        query.limit,
    )))
}

/// GET /api/v1/transactions/pages
///
/// List transactions newest first using zero-based pages.
pub async fn list_transaction_pages(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PageResponse<TransactionResponse>>, AppError> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut violations = BTreeMap::new();
    let page = u32::try_from(query.page).unwrap_or_else(|_| {
        violations.insert(
            "page".to_string(),
            "Page must be greater than or equal to 0".to_string(),
        );
        0
    });
    let size = u32::try_from(query.size).unwrap_or(0);
    if !(1..=MAX_PAGE_SIZE).contains(&size) {
        violations.insert(
            "size".to_string(),
            format!("Size must be between 1 and {}", MAX_PAGE_SIZE),
        );
    }
    if !violations.is_empty() {
        return Err(AppError::violations(violations));
    }

    let request = PageRequest::new(page, size)?;
    let page = state.list_transactions.execute_page(request).await?;

    Ok(Json(page.map(TransactionResponse::from)))
}
