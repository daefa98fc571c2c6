// API payload types
// Field names are camelCase on the wire

use crate::query::FilterSpec;
use crate::store::Record;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// `{success, data}` wrapper shared by the view endpoints
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Filtered record listing with the filters echoed back
#[derive(Debug, Serialize)]
pub struct CertsResponse<'a> {
    pub success: bool,
    pub data: Vec<&'a Record>,
    pub total: usize,
    pub filters: &'a FilterSpec,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub success: bool,
    /// `healthy` when the dataset loads, `degraded` otherwise
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    /// Seconds since the server started
    pub uptime: i64,
    pub data_status: DataStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataStatus {
    pub available: bool,
    pub records: usize,
    pub loaded_at: Option<DateTime<Utc>>,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    pub message: &'a str,
}
