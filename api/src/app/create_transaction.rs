//! Create transaction use case
//!
//! Generates an id, stamps the creation time, builds a pending transaction and stores it.
//! There is no idempotency key: two calls with the same input create two transactions.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;

use crate::app::validation_policy::TransactionValidationPolicy;
use crate::domain::entities::Transaction;
use crate::domain::ports::{IdGenerator, TransactionRepository};
use crate::error::AppError;

/// Input for creating a transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionCommand {
    pub amount: Decimal,
    pub currency: String,
    pub origin_account_number: String,
    pub destination_account_number: String,
}

pub struct CreateTransactionUseCase<TR, IG>
where
    TR: TransactionRepository,
    IG: IdGenerator,
{
    transactions: Arc<TR>,
    ids: Arc<IG>,
    policy: TransactionValidationPolicy,
}

impl<TR, IG> CreateTransactionUseCase<TR, IG>
where
    TR: TransactionRepository,
    IG: IdGenerator,
{
    pub fn new(transactions: Arc<TR>, ids: Arc<IG>) -> Self {
        Self {
            transactions,
            ids,
            policy: TransactionValidationPolicy::new(),
        }
    }

    pub async fn execute(&self, command: CreateTransactionCommand) -> Result<Transaction, AppError> {
        let id = self.ids.generate_id();

        let transaction = Transaction::create(
            &id,
            command.amount,
            &command.currency,
            &command.origin_account_number,
            &command.destination_account_number,
            Utc::now(),
        )?;

        // Checked on the normalized fields so the policy and the entity agree
        self.policy.validate(&transaction)?;

        let saved = self.transactions.save(transaction).await?;
        tracing::info!(
            id = %saved.id(),
            amount = %saved.amount(),
            currency = %saved.currency(),
            "Transaction created"
        );

        Ok(saved)
    }
}
