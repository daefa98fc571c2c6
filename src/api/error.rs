//! API error types

use super::response;
use crate::http::ResponseEnvelope;
use crate::logger;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("dataset unavailable: {0}")]
    DataUnavailable(#[from] StoreError),
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl AppError {
    /// Log the full error and answer with a generic 500
    pub fn into_envelope(self) -> ResponseEnvelope {
        logger::log_error(&self.to_string());
        response::internal_error()
    }
}
