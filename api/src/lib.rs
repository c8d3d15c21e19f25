//! Transactions API
//!
//! A small service to create, fetch and list financial transactions.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{InMemoryTransactionRepository, UuidIdGenerator};
use app::{CreateTransactionUseCase, GetTransactionUseCase, ListTransactionsUseCase};

pub const TRANSACTIONS_PATH: &str = "/api/v1/transactions";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub create_transaction:
        Arc<CreateTransactionUseCase<InMemoryTransactionRepository, UuidIdGenerator>>,
    pub get_transaction: Arc<GetTransactionUseCase<InMemoryTransactionRepository>>,
    pub list_transactions: Arc<ListTransactionsUseCase<InMemoryTransactionRepository>>,
}

impl AppState {
    /// Wire every use case to the same store
    pub fn new(
        transactions: Arc<InMemoryTransactionRepository>,
        ids: Arc<UuidIdGenerator>,
    ) -> Self {
        Self {
            create_transaction: Arc::new(CreateTransactionUseCase::new(
                transactions.clone(),
                ids,
            )),
            get_transaction: Arc::new(GetTransactionUseCase::new(transactions.clone())),
            list_transactions: Arc::new(ListTransactionsUseCase::new(transactions)),
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router with all routes and middleware
pub fn router(state: AppState) -> Router {
    let transactions = Router::new()
        .route(
            "/",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/pages", get(handlers::list_transaction_pages))
        .route("/:id", get(handlers::get_transaction));

    Router::new()
        // Health check
        .route("/health", get(health))
        .nest(TRANSACTIONS_PATH, transactions)
        // Middleware
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
