//! Background completion worker.
//!
//! Each accepted webhook spawns one fire-and-forget task that waits out the
//! simulated unit of work and then transitions the transaction from
//! `PROCESSING` to `PROCESSED` with a compare-and-swap write. The worker is
//! never awaited by the ingestion handler.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::clock;
use crate::db::models::TransactionStatus;
use crate::store::{StoreError, TransactionStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionOutcome {
    /// This worker performed the transition.
    Completed,
    /// The record was already `PROCESSED`, or a racing worker won the swap.
    AlreadyProcessed,
    /// No record for the id; should not happen given ingestion ordering.
    Missing,
}

pub fn spawn_completion(store: Arc<dyn TransactionStore>, transaction_id: String, delay: Duration) {
    tokio::spawn(async move {
        match complete_transaction(store.as_ref(), &transaction_id, delay).await {
            Ok(CompletionOutcome::Completed) => {
                info!(%transaction_id, "transaction processed");
            }
            Ok(CompletionOutcome::AlreadyProcessed) => {
                info!(%transaction_id, "transaction was already processed");
            }
            Ok(CompletionOutcome::Missing) => {
                warn!(%transaction_id, "transaction missing at completion time");
            }
            // No retry: the record stays PROCESSING, which is the
            // operational signal for a stuck transaction.
            Err(err) => {
                error!(%transaction_id, error = %err, "transaction completion failed");
            }
        }
    });
}

pub async fn complete_transaction(
    store: &dyn TransactionStore,
    transaction_id: &str,
    delay: Duration,
) -> Result<CompletionOutcome, StoreError> {
    // Simulated external work (a cancellable timer, not a busy loop).
    sleep(delay).await;

    let Some(tx) = store.get(transaction_id).await? else {
        return Ok(CompletionOutcome::Missing);
    };

    if tx.status == TransactionStatus::Processed {
        return Ok(CompletionOutcome::AlreadyProcessed);
    }

    let updated = store
        .update_status(
            transaction_id,
            TransactionStatus::Processing,
            TransactionStatus::Processed,
            clock::now(),
        )
        .await?;

    if updated {
        Ok(CompletionOutcome::Completed)
    } else {
        // Lost the swap to a concurrent worker.
        Ok(CompletionOutcome::AlreadyProcessed)
    }
}
