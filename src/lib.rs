pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod services;
pub mod startup;
pub mod store;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::store::TransactionStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TransactionStore>,
    pub processing_delay: Duration,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/v1/webhooks/transactions",
            post(handlers::webhook::receive_webhook),
        )
        .route(
            "/v1/transactions/:transaction_id",
            get(handlers::webhook::get_transaction),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
