pub mod webhook;

use axum::{Json, response::IntoResponse};
use serde_json::json;

use crate::clock;

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "HEALTHY",
        "current_time": clock::format_timestamp(clock::now()),
    }))
}
