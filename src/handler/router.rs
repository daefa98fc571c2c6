//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: resolves `(method, path)` against the
//! route table, runs the matching handler, and finishes the envelope with the
//! default security and CORS headers.

use crate::api::{self, ApiRoute};
use crate::config::AppState;
use crate::http::{self, ResponseEnvelope};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::IF_NONE_MATCH;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

const DEFAULT_API_PREFIX: &str = "/api";

/// What a request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// CORS preflight on any path
    Preflight,
    Api(ApiRoute),
    /// Path under the API prefix with no endpoint
    ApiNotFound,
    Static,
    MethodNotAllowed,
}

/// Route table resolved once from configuration
#[derive(Debug, Clone)]
pub struct RouteTable {
    api_prefix: String,
}

impl RouteTable {
    /// Build the table for `api_prefix`; a blank prefix falls back to `/api`
    pub fn new(api_prefix: &str) -> Self {
        let trimmed = api_prefix.trim().trim_matches('/');
        let api_prefix = if trimmed.is_empty() {
            logger::log_warning(&format!(
                "Invalid API prefix '{api_prefix}', using {DEFAULT_API_PREFIX}"
            ));
            DEFAULT_API_PREFIX.to_string()
        } else {
            format!("/{trimmed}")
        };
        Self { api_prefix }
    }

    pub fn api_prefix(&self) -> &str {
        &self.api_prefix
    }

    pub fn resolve(&self, method: &Method, path: &str) -> Action {
        if method == Method::OPTIONS {
            return Action::Preflight;
        }
        if method != Method::GET && method != Method::HEAD {
            return Action::MethodNotAllowed;
        }
        match self.api_relative(path) {
            Some(rest) => ApiRoute::from_relative(rest).map_or(Action::ApiNotFound, Action::Api),
            None => Action::Static,
        }
    }

    /// Remainder of `path` after the API prefix, if the path is under it
    fn api_relative<'a>(&self, path: &'a str) -> Option<&'a str> {
        let rest = path.strip_prefix(self.api_prefix.as_str())?;
        (rest.is_empty() || rest.starts_with('/')).then_some(rest)
    }
}

/// Request context encapsulating information needed for request processing
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub if_none_match: Option<String>,
}

impl RequestContext {
    pub fn from_request<B>(req: &Request<B>) -> Self {
        Self {
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: req.uri().query().map(ToString::to_string),
            if_none_match: req
                .headers()
                .get(IF_NONE_MATCH)
                .and_then(|v| v.to_str().ok())
                .map(ToString::to_string),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let ctx = RequestContext::from_request(&req);
    let is_head = ctx.method == Method::HEAD;
    let access_log = state.config.logging.access_log;
    let (method, path) = (ctx.method.clone(), ctx.path.clone());
    if access_log {
        logger::log_request(&method, &path, ctx.query.as_deref());
    }

    let envelope = route_request(state, ctx).await;

    if access_log {
        logger::log_response(
            &method,
            &path,
            envelope.status,
            envelope.body.len(),
            started.elapsed(),
        );
    }
    Ok(envelope.into_response(is_head))
}

/// Resolve and run one request, then merge the default headers.
///
/// The handler runs in its own task; a panic there yields a generic 500.
pub async fn route_request(state: Arc<AppState>, ctx: RequestContext) -> ResponseEnvelope {
    let handler_state = Arc::clone(&state);
    let mut envelope = run_isolated(async move { dispatch(&handler_state, &ctx).await }).await;
    envelope.merge_defaults(&state.default_headers);
    envelope
}

async fn dispatch(state: &AppState, ctx: &RequestContext) -> ResponseEnvelope {
    match state.routes.resolve(&ctx.method, &ctx.path) {
        Action::Preflight => http::build_options_response(),
        Action::MethodNotAllowed => api::method_not_allowed(&ctx.method),
        Action::ApiNotFound => {
            logger::log_not_found(&ctx.path);
            api::not_found(&ctx.path)
        }
        Action::Api(route) => api::handle_api(route, state, ctx.query.as_deref()).await,
        Action::Static => {
            state
                .assets
                .serve(&ctx.path, ctx.if_none_match.as_deref())
                .await
        }
    }
}

async fn run_isolated<F>(handler: F) -> ResponseEnvelope
where
    F: Future<Output = ResponseEnvelope> + Send + 'static,
{
    match tokio::spawn(handler).await {
        Ok(envelope) => envelope,
        Err(e) => {
            logger::log_error(&format!("Request handler failed: {e}"));
            api::internal_error()
        }
    }
}
