// Data API handlers module
// Each handler reads the current dataset snapshot and renders one view of it

use chrono::Utc;
use hyper::StatusCode;

use super::error::AppError;
use super::response::{json_response, API_CACHE};
use super::types::{CertsResponse, DataResponse, DataStatus, HealthResponse};
use crate::config::AppState;
use crate::http::{CachePolicy, ResponseEnvelope};
use crate::logger;
use crate::query::{self, FilterSpec};

/// Filtered record listing; also served at the API root
pub async fn handle_certs(
    state: &AppState,
    query: Option<&str>,
) -> Result<ResponseEnvelope, AppError> {
    let store = state.data.snapshot().await?;
    let filters = FilterSpec::from_query(query);
    let data = filters.apply(store.records());

    let body = CertsResponse {
        success: true,
        total: data.len(),
        data,
        filters: &filters,
    };
    json_response(StatusCode::OK, &body, API_CACHE)
}

pub async fn handle_stats(state: &AppState) -> Result<ResponseEnvelope, AppError> {
    let store = state.data.snapshot().await?;
    let body = DataResponse::ok(query::stats(store.records()));
    json_response(StatusCode::OK, &body, API_CACHE)
}

pub async fn handle_countries(state: &AppState) -> Result<ResponseEnvelope, AppError> {
    let store = state.data.snapshot().await?;
    let body = DataResponse::ok(query::countries(store.records()));
    json_response(StatusCode::OK, &body, API_CACHE)
}

pub async fn handle_sectors(state: &AppState) -> Result<ResponseEnvelope, AppError> {
    let store = state.data.snapshot().await?;
    let body = DataResponse::ok(query::sectors(store.records()));
    json_response(StatusCode::OK, &body, API_CACHE)
}

/// Liveness payload; reports `degraded` instead of failing when the dataset is unavailable
pub async fn handle_health(state: &AppState) -> Result<ResponseEnvelope, AppError> {
    let now = Utc::now();
    let cache_ttl_secs = state.config.data_ttl().as_secs();

    let (status, data_status) = match state.data.snapshot().await {
        Ok(store) => (
            "healthy",
            DataStatus {
                available: true,
                records: store.len(),
                loaded_at: Some(store.loaded_at()),
                cache_ttl_secs,
            },
        ),
        Err(e) => {
            logger::log_warning(&format!("Health check: {e}"));
            (
                "degraded",
                DataStatus {
                    available: false,
                    records: 0,
                    loaded_at: None,
                    cache_ttl_secs,
                },
            )
        }
    };

    let body = HealthResponse {
        success: true,
        status,
        timestamp: now,
        version: env!("CARGO_PKG_VERSION"),
        uptime: (now - state.started_at).num_seconds(),
        data_status,
    };
    json_response(StatusCode::OK, &body, CachePolicy::NoStore)
}
