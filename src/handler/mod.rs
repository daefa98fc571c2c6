//! Request handler module
//!
//! Routes each request to the data API or the static resolver.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, route_request, Action, RequestContext, RouteTable};
pub use static_files::StaticResolver;
