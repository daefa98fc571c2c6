// API module entry
// Read-only JSON views over the CERT dataset

mod error;
mod handlers;
mod response;
mod types;

use crate::config::AppState;
use crate::http::ResponseEnvelope;

// Re-export public types
pub use error::AppError;
pub use response::{internal_error, method_not_allowed, not_found};

/// Endpoints under the API prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiRoute {
    Certs,
    Stats,
    Countries,
    Sectors,
    Health,
}

impl ApiRoute {
    /// Match a path relative to the API prefix; the empty path is the API root
    pub fn from_relative(path: &str) -> Option<Self> {
        match path.trim_end_matches('/') {
            "" | "/certs" => Some(Self::Certs),
            "/stats" => Some(Self::Stats),
            "/countries" => Some(Self::Countries),
            "/sectors" => Some(Self::Sectors),
            "/health" => Some(Self::Health),
            _ => None,
        }
    }
}

/// API route handler
///
/// Dispatches to handler functions by route; errors become generic 500 envelopes
pub async fn handle_api(route: ApiRoute, state: &AppState, query: Option<&str>) -> ResponseEnvelope {
    let result = match route {
        ApiRoute::Certs => handlers::handle_certs(state, query).await,
        ApiRoute::Stats => handlers::handle_stats(state).await,
        ApiRoute::Countries => handlers::handle_countries(state).await,
        ApiRoute::Sectors => handlers::handle_sectors(state).await,
        ApiRoute::Health => handlers::handle_health(state).await,
    };
    result.unwrap_or_else(AppError::into_envelope)
}
