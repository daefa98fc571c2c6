// Application state module
// Everything a request handler needs, built once at startup and shared by reference

use chrono::{DateTime, Utc};
use hyper::HeaderMap;
use std::path::Path;
use std::sync::Arc;

use super::types::Config;
use crate::cache::{Clock, SystemClock};
use crate::handler::{RouteTable, StaticResolver};
use crate::http::headers;
use crate::store::DataSource;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Route table resolved from `routes.api_prefix`
    pub routes: RouteTable,
    /// Static resolver owning the asset cache
    pub assets: StaticResolver,
    /// Dataset source owning the dataset cache
    pub data: DataSource,
    /// Security and CORS headers merged into every response
    pub default_headers: HeaderMap,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build state whose caches read time from `clock`
    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Self {
        let routes = RouteTable::new(&config.routes.api_prefix);
        let assets = StaticResolver::with_clock(
            Path::new(&config.static_files.root),
            &config.static_files.index_file,
            config.static_ttl(),
            Arc::clone(&clock),
        );
        let data = DataSource::with_clock(&config.data.path, config.data_ttl(), clock);
        let default_headers = headers::default_headers(&config.http);

        Self {
            config,
            routes,
            assets,
            data,
            default_headers,
            started_at: Utc::now(),
        }
    }
}
