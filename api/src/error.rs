//! Unified error types for the Transactions API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Core business logic errors
//! - `AppError`: Application layer errors (wraps domain errors for HTTP responses)

use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const TRANSACTION_NOT_FOUND: &str = "TRANSACTION_NOT_FOUND";
pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

/// Domain layer errors - pure business logic errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value the entity or a value object refuses to hold
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Transaction not found with ID: {0}")]
    TransactionNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => VALIDATION_ERROR,
            DomainError::InvalidArgument(_) => INVALID_ARGUMENT,
            DomainError::TransactionNotFound(_) => TRANSACTION_NOT_FOUND,
            DomainError::Internal(_) => INTERNAL_ERROR,
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            DomainError::Validation(msg)
            | DomainError::InvalidArgument(msg)
            | DomainError::Internal(msg) => msg.clone(),
            DomainError::TransactionNotFound(_) => self.to_string(),
        }
    }
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Invalid request: {message}")]
    InvalidRequest {
        message: String,
        violations: BTreeMap<String, String>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl AppError {
    /// Request-level validation failure with per-field messages
    pub fn violations(violations: BTreeMap<String, String>) -> Self {
        AppError::InvalidRequest {
            message: "Request validation failed".to_string(),
            violations,
        }
    }
}

/// Error response body for JSON responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    pub detail: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub violations: Option<BTreeMap<String, String>>,
}

impl ErrorResponse {
    fn new(code: &str, message: String, detail: &str) -> Self {
        Self {
            code: code.to_string(),
            message,
            detail: detail.to_string(),
            timestamp: Utc::now(),
            violations: None,
        }
    }
}

fn internal_error() -> (StatusCode, ErrorResponse) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorResponse::new(
            INTERNAL_ERROR,
            "An unexpected error occurred".to_string(),
            "Please try again later or contact support if the problem persists",
        ),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Domain(e @ DomainError::TransactionNotFound(_)) => {
                tracing::debug!("{}", e);
                (
                    StatusCode::NOT_FOUND,
                    ErrorResponse::new(
                        e.code(),
                        e.message(),
                        "The requested transaction could not be found",
                    ),
                )
            }
            AppError::Domain(e @ DomainError::Validation(_)) => {
                tracing::debug!("{}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(e.code(), e.message(), "Validation failed"),
                )
            }
            AppError::Domain(e @ DomainError::InvalidArgument(_)) => {
                tracing::debug!("{}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(e.code(), e.message(), "Invalid request parameter"),
                )
            }
            AppError::Domain(DomainError::Internal(msg)) => {
                tracing::error!("Internal error: {}", msg);
                internal_error()
            }
            AppError::InvalidRequest {
                message,
                violations,
            } => {
                tracing::debug!("Request rejected: {:?}", violations);
                let mut body = ErrorResponse::new(
                    VALIDATION_ERROR,
                    message,
                    "One or more fields contain invalid values",
                );
                body.violations = Some(violations);
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(INVALID_ARGUMENT, msg, "Invalid request parameter"),
            ),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn domain_error_codes() {
        assert_eq!(
            DomainError::Validation("x".into()).code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            DomainError::TransactionNotFound("abc".into()).code(),
            "TRANSACTION_NOT_FOUND"
        );
        assert_eq!(
            DomainError::InvalidArgument("x".into()).code(),
            "INVALID_ARGUMENT"
        );
        assert_eq!(DomainError::Internal("x".into()).code(), "INTERNAL_ERROR");
    }

    #[test]
    fn not_found_message_carries_id() {
        let err = DomainError::TransactionNotFound("tx-42".into());
        assert_eq!(err.message(), "Transaction not found with ID: tx-42");
    }

    #[tokio::test]
    async fn not_found_maps_to_404() {
        let response = AppError::from(DomainError::TransactionNotFound("tx-1".into())).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["code"], "TRANSACTION_NOT_FOUND");
        assert!(body.get("violations").is_none());
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn validation_maps_to_400() {
        let response =
            AppError::from(DomainError::Validation("Transaction amount cannot exceed 1000000.00".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["message"], "Transaction amount cannot exceed 1000000.00");
        assert_eq!(body["detail"], "Validation failed");
    }

    #[tokio::test]
    async fn invalid_argument_maps_to_400_with_own_code() {
        let response = AppError::from(DomainError::InvalidArgument(
            "Amount must be positive".into(),
        ))
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INVALID_ARGUMENT");
        assert_eq!(body["message"], "Amount must be positive");
        assert_eq!(body["detail"], "Invalid request parameter");
    }

    #[tokio::test]
    async fn violations_are_serialized() {
        let mut violations = BTreeMap::new();
        violations.insert("amount".to_string(), "Amount is required".to_string());

        let response = AppError::violations(violations).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["violations"]["amount"], "Amount is required");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let response = AppError::from(DomainError::Internal("lock poisoned".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert!(!body["message"].as_str().unwrap().contains("poisoned"));
    }
}
