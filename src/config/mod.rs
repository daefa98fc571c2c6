// Configuration module entry point
// Loads layered configuration and builds the shared application state

mod state;
mod types;

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

// Re-export public types
pub use state::AppState;
pub use types::{
    CacheConfig, Config, DataConfig, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig,
    ServerConfig, StaticFilesConfig,
};

/// Prefix for environment overrides, e.g. `CERTDIR_SERVER__PORT=9000`
const ENV_PREFIX: &str = "CERTDIR";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing file is fine; every field has a default
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    pub const fn static_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.static_ttl_secs)
    }

    pub const fn data_ttl(&self) -> Duration {
        Duration::from_secs(self.cache.data_ttl_secs)
    }
}
