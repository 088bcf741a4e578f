//! Workflow REST endpoints.
//!
//! The workflow execution engine is not built yet; every handler answers
//! 501 so clients can discover the surface without relying on it.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Serialize;

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Create the workflow API router
pub fn create_workflow_router() -> Router {
    Router::new()
        .route("/api/workflows", get(not_implemented).post(not_implemented))
        .route("/api/workflows/:id", get(not_implemented))
        .route("/api/workflows/:id/run", post(not_implemented))
}

async fn not_implemented() -> Response {
    (
        StatusCode::NOT_IMPLEMENTED,
        Json(ErrorResponse {
            error: "Workflows are not implemented yet".to_string(),
        }),
    )
        .into_response()
}
