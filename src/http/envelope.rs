//! Response envelope module
//!
//! Both handlers produce a [`ResponseEnvelope`]: status, headers, and a body that is
//! either UTF-8 text or base64 with `is_binary` set. Conversion to a hyper
//! response happens once, at the edge.

use super::cache::CachePolicy;
use super::mime;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE};
use hyper::{HeaderMap, Response, StatusCode};

/// Uniform handler output before transport serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
    pub is_binary: bool,
}

impl ResponseEnvelope {
    /// Response with no body and no headers
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: String::new(),
            is_binary: false,
        }
    }

    /// Text response with the given content type
    pub fn text(status: StatusCode, content_type: &str, body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            ..Self::empty(status)
        }
        .with_header(CONTENT_TYPE, content_type)
    }

    /// Encode raw bytes according to the content type.
    ///
    /// Textual types go out as text unless the bytes are not valid UTF-8, in which
    /// case they are base64-encoded like any binary payload.
    pub fn from_bytes(status: StatusCode, content_type: &str, content: &[u8]) -> Self {
        let (body, is_binary) = if mime::is_textual(content_type) {
            match std::str::from_utf8(content) {
                Ok(text) => (text.to_string(), false),
                Err(_) => (STANDARD.encode(content), true),
            }
        } else {
            (STANDARD.encode(content), true)
        };

        Self {
            body,
            is_binary,
            ..Self::empty(status)
        }
        .with_header(CONTENT_TYPE, content_type)
    }

    /// Set a header, replacing any previous value.
    ///
    /// Values that are not valid header text are dropped with a warning.
    pub fn with_header(mut self, name: HeaderName, value: &str) -> Self {
        match HeaderValue::from_str(value) {
            Ok(value) => {
                self.headers.insert(name, value);
            }
            Err(e) => {
                crate::logger::log_warning(&format!("Dropping invalid {name} header value: {e}"));
            }
        }
        self
    }

    pub fn with_cache_policy(self, policy: CachePolicy) -> Self {
        self.with_header(CACHE_CONTROL, &policy.to_header_value())
    }

    /// Add every header in `defaults` that the handler did not set itself
    pub fn merge_defaults(&mut self, defaults: &HeaderMap) {
        for (name, value) in defaults {
            if !self.headers.contains_key(name) {
                self.headers.insert(name.clone(), value.clone());
            }
        }
    }

    /// Header value as text, if present and printable
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Body as raw bytes, undoing base64 for binary payloads
    pub fn decoded_body(&self) -> Result<Bytes, base64::DecodeError> {
        if self.is_binary {
            STANDARD.decode(&self.body).map(Bytes::from)
        } else {
            Ok(Bytes::from(self.body.clone()))
        }
    }

    /// Serialize into a hyper response; `is_head` keeps headers but drops the body
    pub fn into_response(self, is_head: bool) -> Response<Full<Bytes>> {
        let payload = match self.decoded_body() {
            Ok(bytes) => bytes,
            Err(e) => {
                crate::logger::log_error(&format!("Failed to decode binary body: {e}"));
                let mut response = Response::new(Full::new(Bytes::new()));
                *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
                return response;
            }
        };

        let mut headers = self.headers;
        headers.insert(CONTENT_LENGTH, HeaderValue::from(payload.len()));

        let body = if is_head { Bytes::new() } else { payload };
        let mut response = Response::new(Full::new(body));
        *response.status_mut() = self.status;
        *response.headers_mut() = headers;
        response
    }
}
