// API response utility functions module

use super::error::AppError;
use super::types::ErrorBody;
use crate::http::cache::API_MAX_AGE;
use crate::http::headers::ALLOWED_METHODS;
use crate::http::response::with_allow_header;
use crate::http::{CachePolicy, ResponseEnvelope};
use hyper::{Method, StatusCode};
use serde::Serialize;

const JSON: &str = "application/json";

/// Cache policy for successful data responses
pub const API_CACHE: CachePolicy = CachePolicy::MaxAge(API_MAX_AGE);

/// Build JSON response
pub fn json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    policy: CachePolicy,
) -> Result<ResponseEnvelope, AppError> {
    let json = serde_json::to_string_pretty(body)?;
    Ok(ResponseEnvelope::text(status, JSON, json).with_cache_policy(policy))
}

/// `{error, message}` body; never cached
pub fn error_response(status: StatusCode, message: &str) -> ResponseEnvelope {
    let body = ErrorBody {
        error: status.canonical_reason().unwrap_or("Error"),
        message,
    };
    let json = serde_json::to_string(&body)
        .unwrap_or_else(|_| format!(r#"{{"error":"{}"}}"#, status.as_u16()));
    ResponseEnvelope::text(status, JSON, json).with_cache_policy(CachePolicy::NoStore)
}

/// 404 Not Found response for unknown API paths
pub fn not_found(path: &str) -> ResponseEnvelope {
    error_response(
        StatusCode::NOT_FOUND,
        &format!("No API endpoint at {path}"),
    )
}

/// 405 Method Not Allowed response
pub fn method_not_allowed(method: &Method) -> ResponseEnvelope {
    with_allow_header(error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        &format!("Method {method} is not supported; use {ALLOWED_METHODS}"),
    ))
}

/// 500 response with a generic body; details stay in the server log
pub fn internal_error() -> ResponseEnvelope {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "The request could not be completed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_shape() {
        let envelope = not_found("/api/nope");
        assert_eq!(envelope.status, StatusCode::NOT_FOUND);
        assert_eq!(envelope.header("content-type"), Some("application/json"));
        assert_eq!(
            envelope.header("cache-control"),
            Some("no-cache, no-store, must-revalidate")
        );
        let body: serde_json::Value = serde_json::from_str(&envelope.body).unwrap();
        assert_eq!(body["error"], "Not Found");
        assert_eq!(body["message"], "No API endpoint at /api/nope");
    }

    #[test]
    fn test_method_not_allowed_lists_methods() {
        let envelope = method_not_allowed(&Method::DELETE);
        assert_eq!(envelope.status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(envelope.header("allow"), Some(ALLOWED_METHODS));
        assert!(envelope.body.contains("DELETE"));
    }

    #[test]
    fn test_json_response_cache_policy() {
        let envelope =
            json_response(StatusCode::OK, &serde_json::json!({"success": true}), API_CACHE)
                .unwrap();
        assert_eq!(envelope.header("cache-control"), Some("public, max-age=300"));
        assert!(!envelope.is_binary);
    }
}
