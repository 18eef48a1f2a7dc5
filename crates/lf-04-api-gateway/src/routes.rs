//! Route handlers.
//!
//! Handlers only marshal: extract hashes and principal, call the lookup API,
//! and map the outcome to a status code and JSON body.

use crate::domain::error::ApiError;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lf_02_tx_reconciler::{RecordFailure, Resolution, TransactionLookupApi};
use serde::Serialize;
use shared_types::{PrincipalId, TransactionRecord};
use std::sync::Arc;
use tracing::debug;

/// Header carrying the authenticated caller, set by the upstream auth layer.
pub const PRINCIPAL_HEADER: &str = "x-principal-id";

/// Query parameter carrying the requested hashes.
pub const HASHES_PARAM: &str = "transactionHashes";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn TransactionLookupApi>,
}

/// Body of a 207 response.
#[derive(Debug, Serialize)]
pub struct PartialBody {
    pub transactions: Vec<TransactionRecord>,
    pub failures: Vec<RecordFailure>,
}

/// Principal from the `x-principal-id` header, if present.
pub fn principal_from(headers: &HeaderMap) -> Result<Option<PrincipalId>, ApiError> {
    let Some(value) = headers.get(PRINCIPAL_HEADER) else {
        return Ok(None);
    };
    let text = value
        .to_str()
        .map_err(|e| ApiError::invalid_principal(e.to_string()))?;
    text.parse::<PrincipalId>()
        .map(Some)
        .map_err(|e| ApiError::invalid_principal(e.to_string()))
}

/// Hashes from repeated and/or comma-separated `transactionHashes` values.
pub fn hashes_from_query(params: Vec<(String, String)>) -> Vec<String> {
    params
        .into_iter()
        .filter(|(key, _)| key == HASHES_PARAM)
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect()
}

fn resolution_response(resolution: Resolution) -> Response {
    if resolution.is_partial() {
        let body = PartialBody {
            transactions: resolution.records,
            failures: resolution.failures,
        };
        (StatusCode::MULTI_STATUS, Json(body)).into_response()
    } else {
        (StatusCode::OK, Json(resolution.records)).into_response()
    }
}

/// `GET /lime/eth?transactionHashes=...`
pub async fn lookup_hashes(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let principal = principal_from(&headers)?;
    let hashes = hashes_from_query(params);
    if hashes.is_empty() {
        debug!("Empty hash list");
        return Ok(Json(Vec::<TransactionRecord>::new()).into_response());
    }
    let resolution = state.api.resolve(hashes, principal).await?;
    Ok(resolution_response(resolution))
}

/// `GET /lime/eth/{rlphex}`
pub async fn lookup_encoded(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(encoded): Path<String>,
) -> Result<Response, ApiError> {
    let principal = principal_from(&headers)?;
    let resolution = state.api.resolve_encoded(&encoded, principal).await?;
    Ok(resolution_response(resolution))
}

/// `GET /lime/all`
pub async fn list_all(State(state): State<AppState>) -> Result<Response, ApiError> {
    let records = state.api.list_all().await?;
    Ok(Json(records).into_response())
}

/// `GET /lime/my`
pub async fn list_owned(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let principal = principal_from(&headers)?.ok_or_else(ApiError::missing_principal)?;
    let records = state.api.list_owned(principal).await?;
    Ok(Json(records).into_response())
}

/// `GET /stats`
pub async fn stats(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.api.stats())
}

/// `GET /health`
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "ledger-fetcher",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
