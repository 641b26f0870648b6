use axum::{extract::State, Json};
use std::sync::Arc;

use crate::models::*;
use crate::AppState;

/// API root
#[utoipa::path(
    get,
    path = "/api/",
    responses(
        (status = 200, description = "Welcome message", body = MessageResponse)
    ),
    tag = "system"
)]
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse::new(
        ResponseStatus::Success,
        "Welcome to the Mudemy API",
    ))
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = state.db.ping().await.is_ok();

    Json(HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
    })
}
