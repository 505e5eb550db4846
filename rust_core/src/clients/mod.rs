//! Thin HTTP clients for the upstream market APIs
//!
//! Clients fetch and decode; they do not normalize. Each request is a
//! single bounded attempt with a shared deadline and no retries.

use std::time::Duration;

use serde_json::Value;

pub mod manifold;
pub mod polymarket;

// Re-export commonly used types
pub use manifold::ManifoldClient;
pub use polymarket::PolymarketClient;

/// Deadline for one upstream fetch, connection through decoded body
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(12);

/// Record cap requested from every upstream
pub const FETCH_LIMIT: usize = 200;

/// Treat a decoded body as a list of records.
///
/// Upstreams are expected to answer with a JSON array; anything else is
/// logged and treated as an empty list rather than an error.
pub(crate) fn records_or_empty(provider: &'static str, body: Value) -> Vec<Value> {
    match body {
        Value::Array(records) => records,
        _ => {
            log::warn!("{} returned a non-array payload, treating as empty", provider);
            Vec::new()
        }
    }
}
