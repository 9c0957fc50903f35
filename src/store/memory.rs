use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::db::models::{Transaction, TransactionStatus};
use crate::store::{StoreError, TransactionStore};

/// A thread-safe in-memory transaction store with the same atomicity
/// guarantees as the Postgres store: insert-if-absent and the status
/// compare-and-swap both run under a single write lock acquisition.
#[derive(Default, Clone)]
pub struct InMemoryStore {
    rows: Arc<RwLock<HashMap<String, Transaction>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TransactionStore for InMemoryStore {
    async fn get(&self, transaction_id: &str) -> Result<Option<Transaction>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.get(transaction_id).cloned())
    }

    async fn insert_if_absent(&self, tx: &Transaction) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&tx.transaction_id) {
            return Ok(false);
        }
        rows.insert(tx.transaction_id.clone(), tx.clone());
        Ok(true)
    }

    async fn update_status(
        &self,
        transaction_id: &str,
        from: TransactionStatus,
        to: TransactionStatus,
        processed_at: NaiveDateTime,
    ) -> Result<bool, StoreError> {
        let mut rows = self.rows.write().await;
        match rows.get_mut(transaction_id) {
            Some(row) if row.status == from => {
                row.status = to;
                row.processed_at = Some(processed_at);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn transaction(id: &str) -> Transaction {
        Transaction::new(
            id.to_string(),
            "A".to_string(),
            "B".to_string(),
            BigDecimal::from_str("10.50").unwrap(),
            "USD".to_string(),
            clock::now(),
        )
    }

    #[tokio::test]
    async fn insert_if_absent_is_first_writer_wins() {
        let store = InMemoryStore::new();
        let first = transaction("T1");
        let mut second = transaction("T1");
        second.source_account = "C".to_string();

        assert!(store.insert_if_absent(&first).await.unwrap());
        assert!(!store.insert_if_absent(&second).await.unwrap());

        let stored = store.get("T1").await.unwrap().unwrap();
        assert_eq!(stored.source_account, "A");
        assert_eq!(stored.created_at, first.created_at);
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let store = InMemoryStore::new();
        assert!(store.get("UNKNOWN").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_status_swaps_once() {
        let store = InMemoryStore::new();
        store.insert_if_absent(&transaction("T1")).await.unwrap();

        let processed_at = clock::now();
        let first = store
            .update_status(
                "T1",
                TransactionStatus::Processing,
                TransactionStatus::Processed,
                processed_at,
            )
            .await
            .unwrap();
        let second = store
            .update_status(
                "T1",
                TransactionStatus::Processing,
                TransactionStatus::Processed,
                clock::now(),
            )
            .await
            .unwrap();

        assert!(first);
        assert!(!second);

        let stored = store.get("T1").await.unwrap().unwrap();
        assert_eq!(stored.status, TransactionStatus::Processed);
        assert_eq!(stored.processed_at, Some(processed_at));
    }

    #[tokio::test]
    async fn update_status_on_missing_row_is_noop() {
        let store = InMemoryStore::new();
        let updated = store
            .update_status(
                "UNKNOWN",
                TransactionStatus::Processing,
                TransactionStatus::Processed,
                clock::now(),
            )
            .await
            .unwrap();
        assert!(!updated);
    }
}
