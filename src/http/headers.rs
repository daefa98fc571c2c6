//! Security and CORS headers attached to every response

use crate::config::HttpConfig;
use crate::logger;
use hyper::header::{
    HeaderName, HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_MAX_AGE, CONTENT_SECURITY_POLICY, REFERRER_POLICY,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS,
};
use hyper::HeaderMap;

pub const ALLOWED_METHODS: &str = "GET, HEAD, OPTIONS";

/// Build the fixed header set from configuration.
///
/// Configured values that are not valid header text are skipped with a warning.
pub fn default_headers(http: &HttpConfig) -> HeaderMap {
    let mut headers = HeaderMap::new();

    headers.insert(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.insert(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    insert_configured(&mut headers, REFERRER_POLICY, &http.referrer_policy);
    insert_configured(&mut headers, CONTENT_SECURITY_POLICY, &http.content_security_policy);

    insert_configured(&mut headers, ACCESS_CONTROL_ALLOW_ORIGIN, &http.allowed_origin);
    headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static(ALLOWED_METHODS));
    headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));
    headers.insert(ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));

    headers
}

fn insert_configured(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(v) => {
            headers.insert(name, v);
        }
        Err(_) => logger::log_warning(&format!("Ignoring invalid configured value for {name}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_header_set() {
        let headers = default_headers(&HttpConfig::default());
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["referrer-policy"], "strict-origin-when-cross-origin");
        assert!(headers["content-security-policy"]
            .to_str()
            .unwrap()
            .starts_with("default-src 'self'"));
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], ALLOWED_METHODS);
        assert!(!headers.contains_key("cache-control"));
        assert!(!headers.contains_key("content-type"));
    }

    #[test]
    fn test_single_configured_origin() {
        let http = HttpConfig {
            allowed_origin: "https://certs.example.org".to_string(),
            ..HttpConfig::default()
        };
        let headers = default_headers(&http);
        assert_eq!(headers["access-control-allow-origin"], "https://certs.example.org");
    }

    #[test]
    fn test_invalid_configured_value_is_skipped() {
        let http = HttpConfig {
            referrer_policy: "no\nreferrer".to_string(),
            ..HttpConfig::default()
        };
        let headers = default_headers(&http);
        assert!(!headers.contains_key("referrer-policy"));
        assert!(headers.contains_key("x-frame-options"));
    }
}
