use axum::{http::StatusCode, response::IntoResponse};
use tracing::instrument;

/// Health check endpoint
#[instrument]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
