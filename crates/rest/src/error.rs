//! Error types for the REST API.
//!
//! This module defines the REST-layer error type with automatic conversion
//! from storage errors and rendering as JSON error responses.
//!
//! # Error Mapping
//!
//! Storage errors from the tenancy layer are mapped to HTTP status codes:
//!
//! | Storage Error | HTTP Status | Error Code |
//! |--------------|-------------|------------|
//! | MissingTenantError | 400 | missing-tenant |
//! | InvalidTenantAccess | 403 | invalid-tenant-access |
//! | RecordError::NotFound | 404 | not-found |
//! | RecordError::AlreadyExists | 409 | conflict |
//!
//! The mapping keeps the two tenancy failures distinct on the wire: a
//! missing tenant is a malformed request (the scope could not be
//! established), while invalid tenant access is a refusal to write.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tessera_tenancy::error::{
    InvalidTenantAccess, MissingTenantError, RecordError, StoreError,
};
use thiserror::Error;

/// The primary error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// No tenant could be established for a scoped read (HTTP 400).
    #[error(transparent)]
    MissingTenant(#[from] MissingTenantError),

    /// A write was refused by the tenant access guard (HTTP 403).
    #[error(transparent)]
    InvalidAccess(#[from] InvalidTenantAccess),

    /// Record not found (HTTP 404).
    #[error("record not found: {record_type}/{id}")]
    NotFound {
        /// The record type (e.g. "users").
        record_type: String,
        /// The record ID.
        id: String,
    },

    /// Record already exists (HTTP 409).
    #[error("record already exists: {record_type}/{id}")]
    Conflict {
        /// The record type.
        record_type: String,
        /// The record ID.
        id: String,
    },

    /// Bad request (HTTP 400).
    #[error("bad request: {message}")]
    BadRequest {
        /// Error message.
        message: String,
    },

    /// Internal server error (HTTP 500).
    #[error("internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::MissingTenant(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidAccess(_) => StatusCode::FORBIDDEN,
            RestError::NotFound { .. } => StatusCode::NOT_FOUND,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the machine-readable error code for the response body.
    pub fn error_code(&self) -> &'static str {
        match self {
            RestError::MissingTenant(_) => "missing-tenant",
            RestError::InvalidAccess(_) => "invalid-tenant-access",
            RestError::NotFound { .. } => "not-found",
            RestError::Conflict { .. } => "conflict",
            RestError::BadRequest { .. } => "bad-request",
            RestError::Internal { .. } => "internal",
        }
    }
}

impl From<StoreError> for RestError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MissingTenant(e) => RestError::MissingTenant(e),
            StoreError::InvalidAccess(e) => RestError::InvalidAccess(e),
            StoreError::Record(RecordError::NotFound { record_type, id }) => {
                RestError::NotFound { record_type, id }
            }
            StoreError::Record(RecordError::AlreadyExists { record_type, id }) => {
                RestError::Conflict { record_type, id }
            }
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = json!({
            "error": self.error_code(),
            "message": self.to_string(),
        });
        (status, Json(body)).into_response()
    }
}
