//! Health check endpoint handler.
//!
//! Provides a simple health check endpoint for monitoring and load
//! balancers. Health does not require a resolvable tenant.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tessera_tenancy::store::RecordStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET [base]/health`
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().backend_name(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}
