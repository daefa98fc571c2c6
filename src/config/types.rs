// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub static_files: StaticFilesConfig,
    pub data: DataConfig,
    pub cache: CacheConfig,
    pub routes: RoutesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for the `certdir` target when `RUST_LOG` is not set
    pub level: String,
    pub access_log: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            access_log: true,
        }
    }
}

/// Performance configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            keep_alive_timeout: 75,
            read_timeout: 30,
            write_timeout: 30,
            max_connections: None,
        }
    }
}

/// Response header policy applied to every response
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct HttpConfig {
    /// The single origin allowed by CORS
    pub allowed_origin: String,
    pub content_security_policy: String,
    pub referrer_policy: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            allowed_origin: "*".to_string(),
            content_security_policy: "default-src 'self'; script-src 'self'; \
                style-src 'self' 'unsafe-inline'; img-src 'self' data:; \
                connect-src 'self'; frame-ancestors 'none'"
                .to_string(),
            referrer_policy: "strict-origin-when-cross-origin".to_string(),
        }
    }
}

/// Static asset configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory all asset paths resolve under
    pub root: String,
    /// Root document, also served as the SPA fallback
    pub index_file: String,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            root: "public".to_string(),
            index_file: "index.html".to_string(),
        }
    }
}

/// Dataset location
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DataConfig {
    pub path: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: "data/certs.json".to_string(),
        }
    }
}

/// Cache lifetimes in seconds
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub static_ttl_secs: u64,
    pub data_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            static_ttl_secs: 300,
            data_ttl_secs: 600,
        }
    }
}

/// Routes configuration
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefix reserved for the data API
    pub api_prefix: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            api_prefix: "/api".to_string(),
        }
    }
}
