pub mod error;
pub mod jobs;
pub mod routes;
pub mod types;

use axum::{
    http::{header, HeaderName, Method},
    routing::get,
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// CORS headers for the read and submit handlers.
///
/// Mirrors what [`jobs::preflight`] advertises.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

/// Create the API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check endpoint
        .route("/health", get(routes::health_check))
        // Read interface and submission; OPTIONS is added after the CORS
        // layer so every preflight reaches the handler
        .route(
            "/api/jobs",
            get(jobs::list_jobs)
                .post(jobs::submit_job)
                .layer(cors())
                .options(jobs::preflight),
        )
        // Attach application state
        .with_state(state)
        // Middleware
        .layer(TraceLayer::new_for_http())
}
