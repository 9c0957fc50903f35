use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bigdecimal::BigDecimal;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::AppState;
use crate::clock;
use crate::db::models::{Transaction, TransactionStatus};
use crate::error::AppError;
use crate::services::processor;
use crate::store::StoreError;
use crate::validation::{
    ValidationError, validate_currency, validate_positive_amount, validate_required,
};

#[derive(Debug, Deserialize)]
pub struct WebhookRequest {
    pub transaction_id: String,
    pub source_account: String,
    pub destination_account: String,
    pub amount: BigDecimal,
    pub currency: String,
}

impl WebhookRequest {
    /// Collects field-level failures instead of stopping at the first one,
    /// and normalizes the currency code to uppercase.
    fn validate(mut self) -> Result<Self, Vec<ValidationError>> {
        let mut details = Vec::new();

        for (field, value) in [
            ("transaction_id", &self.transaction_id),
            ("source_account", &self.source_account),
            ("destination_account", &self.destination_account),
        ] {
            if let Err(err) = validate_required(field, value) {
                details.push(err);
            }
        }

        if let Err(err) = validate_positive_amount(&self.amount) {
            details.push(err);
        }

        match validate_currency(&self.currency) {
            Ok(normalized) => self.currency = normalized,
            Err(err) => details.push(err),
        }

        if details.is_empty() {
            Ok(self)
        } else {
            Err(details)
        }
    }
}

enum IngestOutcome {
    Accepted,
    AlreadyProcessing,
    AlreadyProcessed,
}

impl IngestOutcome {
    fn message(&self) -> &'static str {
        match self {
            IngestOutcome::Accepted => "Webhook received and queued for processing",
            IngestOutcome::AlreadyProcessing => "Transaction already being processed",
            IngestOutcome::AlreadyProcessed => "Transaction already processed",
        }
    }
}

pub async fn receive_webhook(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    // Deserialization failures are validation failures to the sender, so
    // they get the same 400 body shape as field-level rejections.
    let request: WebhookRequest = match serde_json::from_value(body) {
        Ok(request) => request,
        Err(err) => {
            return AppError::Validation(vec![ValidationError::new("body", err.to_string())])
                .into_response();
        }
    };

    let request = match request.validate() {
        Ok(request) => request,
        Err(details) => return AppError::Validation(details).into_response(),
    };

    match ingest(&state, request).await {
        Ok(outcome) => accepted(outcome.message()),
        Err(err) => {
            // Acknowledged without a durable record: the sender cannot tell
            // this apart from success, so make the divergence loud in logs.
            error!(error = %err, "webhook ingestion failed after acknowledgment was promised");
            accepted("Webhook received, processing may be delayed")
        }
    }
}

fn accepted(message: &str) -> Response {
    (StatusCode::ACCEPTED, Json(json!({ "message": message }))).into_response()
}

async fn ingest(state: &AppState, request: WebhookRequest) -> Result<IngestOutcome, StoreError> {
    if let Some(existing) = state.store.get(&request.transaction_id).await? {
        return Ok(match existing.status {
            TransactionStatus::Processing => IngestOutcome::AlreadyProcessing,
            TransactionStatus::Processed => IngestOutcome::AlreadyProcessed,
        });
    }

    let tx = Transaction::new(
        request.transaction_id,
        request.source_account,
        request.destination_account,
        request.amount,
        request.currency,
        clock::now(),
    );

    // The durable write must land before the worker is scheduled and before
    // the acknowledgment goes out.
    if !state.store.insert_if_absent(&tx).await? {
        // Lost the insert race to a concurrent delivery of the same webhook;
        // that delivery owns the completion worker.
        return Ok(IngestOutcome::AlreadyProcessing);
    }

    processor::spawn_completion(
        state.store.clone(),
        tx.transaction_id.clone(),
        state.processing_delay,
    );

    Ok(IngestOutcome::Accepted)
}

pub async fn get_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let tx = state
        .store
        .get(&transaction_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Transaction {} not found", transaction_id)))?;

    Ok(Json(vec![tx]))
}
