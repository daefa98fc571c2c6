//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the handlers:
//! content types, cache policy, default headers, and the response envelope.

pub mod cache;
pub mod envelope;
pub mod headers;
pub mod mime;
pub mod response;

// Re-export commonly used types
pub use cache::CachePolicy;
pub use envelope::ResponseEnvelope;
pub use response::{build_304_response, build_404_response, build_options_response};
