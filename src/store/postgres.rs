use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::PgPool;

use crate::db::models::{Transaction, TransactionStatus};
use crate::store::{StoreError, TransactionStore};

#[derive(Clone)]
pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn get(&self, transaction_id: &str) -> Result<Option<Transaction>, StoreError> {
        let tx = sqlx::query_as::<_, Transaction>(
            "SELECT * FROM transactions WHERE transaction_id = $1",
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(tx)
    }

    async fn insert_if_absent(&self, tx: &Transaction) -> Result<bool, StoreError> {
        // ON CONFLICT DO NOTHING makes first-writer-wins atomic at the
        // database, so concurrent deliveries of the same webhook cannot
        // both observe an insert.
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (
                transaction_id, source_account, destination_account,
                amount, currency, status, created_at, processed_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (transaction_id) DO NOTHING
            "#,
        )
        .bind(&tx.transaction_id)
        .bind(&tx.source_account)
        .bind(&tx.destination_account)
        .bind(&tx.amount)
        .bind(&tx.currency)
        .bind(tx.status)
        .bind(tx.created_at)
        .bind(tx.processed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_status(
        &self,
        transaction_id: &str,
        from: TransactionStatus,
        to: TransactionStatus,
        processed_at: NaiveDateTime,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE transactions
            SET status = $3, processed_at = $4
            WHERE transaction_id = $1 AND status = $2
            "#,
        )
        .bind(transaction_id)
        .bind(from)
        .bind(to)
        .bind(processed_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
