//! Administrative handlers.
//!
//! These endpoints intentionally read across tenants, using an explicit
//! read-across grant scoped to the single storage call. Writes remain
//! guarded; there is no administrative write path that skips the tenant
//! guard.

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use tessera_tenancy::store::RecordStorage;
use tracing::debug;

use crate::error::RestResult;
use crate::extractors::CurrentTenant;
use crate::state::AppState;

/// Handler for the read-across record count.
///
/// `GET /admin/records/{type}/$count`. On a host that resolves to no
/// tenant, the read-across grant stands in for an active tenant and the
/// count spans every tenant. On a bound host the active tenant still
/// takes precedence over the grant, so the count covers that tenant
/// only; serve the admin surface from an unbound host to get the
/// cross-tenant total.
pub async fn count_all_records<S>(
    State(state): State<AppState<S>>,
    Path(record_type): Path<String>,
    tenant: CurrentTenant,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    debug!(record_type = %record_type, "Processing cross-tenant count request");

    let count = {
        let _grant = tenant.context().enter_read_across_tenant();
        state
            .storage()
            .count(tenant.context(), &record_type)
            .await?
    };

    Ok(Json(serde_json::json!({
        "record_type": record_type,
        "count": count,
    }))
    .into_response())
}
