//! Feed API Service - HTTP surface over the crossbook feed.

pub mod api;
pub mod config;

pub use api::{create_router, AppState};
pub use config::Config;
