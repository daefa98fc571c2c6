//! HTTP response building module
//!
//! Envelope builders for the fixed-shape responses, decoupled from handler logic.

use super::cache::CachePolicy;
use super::envelope::ResponseEnvelope;
use super::headers::ALLOWED_METHODS;
use hyper::header::{ALLOW, ETAG};
use hyper::StatusCode;

const NOT_FOUND_HTML: &str = "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>404 Not Found</title></head>\n<body><h1>404 Not Found</h1></body>\n</html>\n";

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str, policy: CachePolicy) -> ResponseEnvelope {
    ResponseEnvelope::empty(StatusCode::NOT_MODIFIED)
        .with_header(ETAG, etag)
        .with_cache_policy(policy)
}

/// Build 404 Not Found page for static requests
pub fn build_404_response() -> ResponseEnvelope {
    ResponseEnvelope::text(StatusCode::NOT_FOUND, "text/html; charset=utf-8", NOT_FOUND_HTML)
        .with_cache_policy(CachePolicy::NoStore)
}

/// Build preflight response: empty body, the router adds CORS and security headers
pub fn build_options_response() -> ResponseEnvelope {
    ResponseEnvelope::empty(StatusCode::OK)
}

/// `Allow` header for 405 responses
pub fn with_allow_header(envelope: ResponseEnvelope) -> ResponseEnvelope {
    envelope.with_header(ALLOW, ALLOWED_METHODS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_is_minimal_html() {
        let envelope = build_404_response();
        assert_eq!(envelope.status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.header("content-type"), Some("text/html; charset=utf-8"));
        assert!(envelope.body.contains("404 Not Found"));
        assert!(!envelope.is_binary);
    }

    #[test]
    fn test_options_is_empty() {
        let envelope = build_options_response();
        assert_eq!(envelope.status, StatusCode::OK);
        assert!(envelope.body.is_empty());
        assert!(envelope.headers.is_empty());
    }

    #[test]
    fn test_304_carries_etag() {
        let envelope = build_304_response("\"abc\"", CachePolicy::Revalidate);
        assert_eq!(envelope.status, StatusCode::NOT_MODIFIED);
        assert_eq!(envelope.header("etag"), Some("\"abc\""));
        assert!(envelope.body.is_empty());
    }
}
