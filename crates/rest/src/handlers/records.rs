//! Record CRUD handlers.
//!
//! All record access flows through the [`RecordStorage`] trait with the
//! request's bound [`TenantContext`], so scope filtering and the write
//! guard apply uniformly: out-of-scope reads are 404s, unscoped reads on
//! an unresolved host are 400s, and cross-tenant writes are 403s.
//!
//! [`TenantContext`]: tessera_tenancy::context::TenantContext

use axum::{
    Json,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tessera_tenancy::store::RecordStorage;
use tracing::debug;

use crate::error::{RestError, RestResult};
use crate::extractors::CurrentTenant;
use crate::state::AppState;

/// Handler for record creation.
///
/// `POST /records/{type}` with a JSON body. The server assigns the
/// record ID and returns it in the `Location` header.
pub async fn create_record<S>(
    State(state): State<AppState<S>>,
    Path(record_type): Path<String>,
    tenant: CurrentTenant,
    Json(content): Json<Value>,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    debug!(record_type = %record_type, tenant = ?tenant.tenant_id(), "Processing create request");

    let record = state
        .storage()
        .insert(tenant.context(), &record_type, content)
        .await?;

    let location = format!("/records/{}/{}", record_type, record.id());
    let location = location
        .parse::<header::HeaderValue>()
        .map_err(|_| RestError::BadRequest {
            message: format!("record type produces an invalid location: {record_type}"),
        })?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(record),
    )
        .into_response())
}

/// Handler for reading a single record.
///
/// `GET /records/{type}/{id}`. A record outside the active read scope is
/// indistinguishable from one that does not exist.
pub async fn read_record<S>(
    State(state): State<AppState<S>>,
    Path((record_type, id)): Path<(String, String)>,
    tenant: CurrentTenant,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    let record = state
        .storage()
        .find(tenant.context(), &record_type, &id)
        .await?
        .ok_or(RestError::NotFound { record_type, id })?;

    Ok(Json(record).into_response())
}

/// Handler for listing records of a type.
///
/// `GET /records/{type}`.
pub async fn list_records<S>(
    State(state): State<AppState<S>>,
    Path(record_type): Path<String>,
    tenant: CurrentTenant,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    let records = state
        .storage()
        .list(tenant.context(), &record_type)
        .await?;

    Ok(Json(records).into_response())
}

/// Handler for counting records of a type.
///
/// `GET /records/{type}/$count`. Counts only within the active read
/// scope; see the admin count for the cross-tenant total.
pub async fn count_records<S>(
    State(state): State<AppState<S>>,
    Path(record_type): Path<String>,
    tenant: CurrentTenant,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    let count = state
        .storage()
        .count(tenant.context(), &record_type)
        .await?;

    Ok(Json(serde_json::json!({
        "record_type": record_type,
        "count": count,
    }))
    .into_response())
}

/// Handler for a full-record update.
///
/// `PUT /records/{type}/{id}` with the replacement content as the body.
pub async fn update_record<S>(
    State(state): State<AppState<S>>,
    Path((record_type, id)): Path<(String, String)>,
    tenant: CurrentTenant,
    Json(content): Json<Value>,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    debug!(record_type = %record_type, id = %id, "Processing update request");

    let record = state
        .storage()
        .update(tenant.context(), &record_type, &id, content)
        .await?;

    Ok(Json(record).into_response())
}

/// Handler for a field-level update.
///
/// `PATCH /records/{type}/{id}` with a JSON object of fields to merge.
/// Field-level writes pass the same tenant guard as full updates.
pub async fn patch_record<S>(
    State(state): State<AppState<S>>,
    Path((record_type, id)): Path<(String, String)>,
    tenant: CurrentTenant,
    Json(body): Json<Value>,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    let Value::Object(fields) = body else {
        return Err(RestError::BadRequest {
            message: "patch body must be a JSON object".to_string(),
        });
    };

    let record = state
        .storage()
        .update_fields(tenant.context(), &record_type, &id, fields)
        .await?;

    Ok(Json(record).into_response())
}

/// Handler for record deletion.
///
/// `DELETE /records/{type}/{id}`. A delete is a write and is guarded as
/// one.
pub async fn delete_record<S>(
    State(state): State<AppState<S>>,
    Path((record_type, id)): Path<(String, String)>,
    tenant: CurrentTenant,
) -> RestResult<Response>
where
    S: RecordStorage + 'static,
{
    debug!(record_type = %record_type, id = %id, "Processing delete request");

    state
        .storage()
        .delete(tenant.context(), &record_type, &id)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
