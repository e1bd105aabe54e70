use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::types::{JobPostRequest, PostJobResponse};
use crate::db::JobRecord;
use crate::services::submission;
use crate::state::AppState;

/// Headers sent on every preflight answer
pub const ALLOWED_HEADERS: &str = "authorization, x-client-info, apikey, content-type";

/// Answer a CORS preflight unconditionally
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::OK,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
        ],
        "ok",
    )
}

/// Validate and persist a new job posting
///
/// The body is parsed by hand so that a malformed payload is reported in the
/// same response shape as every other failure.
#[instrument(skip(state, body), fields(bytes = body.len()))]
pub async fn submit_job(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<PostJobResponse>)> {
    let request: JobPostRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::Internal(format!("Invalid request body: {}", e)))?;

    let store = state.store.clone();
    let record = tokio::task::spawn_blocking(move || submission::submit(store.as_ref(), request))
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))??;

    Ok((StatusCode::CREATED, Json(PostJobResponse::created(record))))
}

/// All postings, newest first
#[instrument(skip(state))]
pub async fn list_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<JobRecord>>> {
    let store = state.store.clone();

    let jobs = tokio::task::spawn_blocking(move || store.list_jobs())
        .await
        .map_err(|e| ApiError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| ApiError::Internal(format!("Failed to load job postings: {}", e)))?;

    tracing::debug!(count = jobs.len(), "Listed job postings");
    Ok(Json(jobs))
}
