//! certdir: static site and read-only JSON API for a directory of national CERT contacts
//!
//! Two handlers share one process: a static resolver for the site's assets and a
//! data API over a validated, cached dataset. Both produce a
//! [`http::ResponseEnvelope`] that the router finishes and hands to hyper.

pub mod api;
pub mod cache;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod query;
pub mod server;
pub mod store;
