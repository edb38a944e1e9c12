//! Tenant introspection handler.
//!
//! Exposes the request's resolved tenant account, the HTTP face of the
//! fixed per-request accessor: views and client code get the account the
//! host resolved to, regardless of any nested activation handler code
//! performs.

use axum::{
    Json,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CurrentTenant;

/// Handler for the current-tenant endpoint.
///
/// `GET /tenant`. Returns the bound account, or `null` when the request
/// host did not resolve to one.
pub async fn current_tenant_handler(tenant: CurrentTenant) -> RestResult<Response> {
    debug!(tenant = ?tenant.tenant_id(), "Processing tenant introspection request");
    Ok(Json(tenant.current_tenant_account()).into_response())
}
