//! Transaction store contract.
//!
//! The store is the single synchronization point of the system: handlers and
//! completion workers coordinate exclusively through `insert_if_absent` and
//! the compare-and-swap `update_status`, never through in-process locks.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use thiserror::Error;

use crate::db::models::{Transaction, TransactionStatus};

pub mod memory;
pub mod postgres;

pub use memory::InMemoryStore;
pub use postgres::PgTransactionStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TransactionStore: Send + Sync {
    async fn get(&self, transaction_id: &str) -> Result<Option<Transaction>, StoreError>;

    /// Inserts the record unless a row with the same `transaction_id` already
    /// exists. Atomic with respect to concurrent callers on the same key;
    /// returns whether the insert happened.
    async fn insert_if_absent(&self, tx: &Transaction) -> Result<bool, StoreError>;

    /// Compare-and-swap status transition. The write only happens if the
    /// stored status equals `from`; returns whether the row was transitioned.
    async fn update_status(
        &self,
        transaction_id: &str,
        from: TransactionStatus,
        to: TransactionStatus,
        processed_at: NaiveDateTime,
    ) -> Result<bool, StoreError>;
}
