//! HTTP cache control module
//!
//! Cache-Control policy per content class, plus `ETag` generation and
//! conditional request matching.

use super::mime;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

pub const ONE_HOUR: u32 = 3600;
pub const ONE_YEAR: u32 = 31_536_000;
/// API payloads may be reused for as long as the dataset is cached for
pub const API_MAX_AGE: u32 = 300;

/// Cache control policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Cacheable, but must be revalidated on every use
    Revalidate,
    /// Public cache with specified max-age (seconds)
    MaxAge(u32),
    /// Fingerprinted asset that never changes under its URL
    Immutable(u32),
    /// Must never be stored
    NoStore,
}

impl CachePolicy {
    /// Policy for a static asset of the given content type
    pub fn for_content_type(content_type: &str) -> Self {
        if mime::is_html(content_type) {
            Self::Revalidate
        } else if mime::is_json(content_type) {
            Self::MaxAge(ONE_HOUR)
        } else {
            Self::Immutable(ONE_YEAR)
        }
    }

    /// Convert to Cache-Control header value
    pub fn to_header_value(self) -> String {
        match self {
            Self::Revalidate => "public, max-age=0, must-revalidate".to_string(),
            Self::MaxAge(max_age) => format!("public, max-age={max_age}"),
            Self::Immutable(max_age) => format!("public, max-age={max_age}, immutable"),
            Self::NoStore => "no-cache, no-store, must-revalidate".to_string(),
        }
    }
}

/// Quoted `ETag` for a payload, e.g. `"abc123def"`
pub fn generate_etag(content: &[u8]) -> String {
    let mut hasher = DefaultHasher::new();
    content.hash(&mut hasher);
    format!("\"{:x}\"", hasher.finish())
}

/// True when `If-None-Match` names `etag` (list or `*` accepted), i.e. a 304 is due
pub fn check_etag_match(if_none_match: Option<&str>, etag: &str) -> bool {
    if_none_match.is_some_and(|header| {
        header
            .split(',')
            .map(str::trim)
            .any(|candidate| candidate == etag || candidate == "*")
    })
}
