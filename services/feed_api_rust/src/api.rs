//! HTTP API for the crossbook feed
//!
//! Routes:
//! - GET /health - service health check
//! - GET /aggregate - merged feed across every registered source
//! - GET /source/{provider} - single-source feed by registry name

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crossbook_core::aggregate;
use crossbook_core::{AggregateError, SourceError, SourceFeed, SourceRegistry};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<SourceRegistry>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(registry: SourceRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
            started_at: Utc::now(),
        }
    }
}

/// Create the API router with all routes configured.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/aggregate", get(aggregate_handler))
        .route("/source/{provider}", get(source_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

// ============ Handlers ============

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    started_at: String,
    timestamp: String,
}

/// Health check.
/// GET /health
async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "feed_api",
        version: env!("CARGO_PKG_VERSION"),
        started_at: state.started_at.to_rfc3339(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Merged feed across every registered source.
/// GET /aggregate
async fn aggregate_handler(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let feed = aggregate::fetch_all(&state.registry).await?;
    Ok(Json(feed))
}

/// Single-source feed by registry name.
/// GET /source/{provider}
async fn source_handler(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let source = state
        .registry
        .get(&provider)
        .ok_or_else(|| ApiError::UnknownSource(provider.clone()))?;

    let items = source.fetch().await?;
    Ok(Json(SourceFeed {
        count: items.len(),
        items,
    }))
}

// ============ Error Handling ============

#[derive(Debug)]
enum ApiError {
    UnknownSource(String),
    Source(SourceError),
    Aggregate(AggregateError),
}

impl From<SourceError> for ApiError {
    fn from(err: SourceError) -> Self {
        ApiError::Source(err)
    }
}

impl From<AggregateError> for ApiError {
    fn from(err: AggregateError) -> Self {
        ApiError::Aggregate(err)
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::UnknownSource(name) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    error: format!("unknown source '{}'", name),
                    detail: None,
                },
            ),
            // Upstream status codes pass through to the caller
            ApiError::Source(SourceError::UpstreamStatus { provider, status }) => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
                ErrorResponse {
                    error: format!("{} fetch failed", provider),
                    detail: None,
                },
            ),
            ApiError::Source(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "unexpected error".to_string(),
                    detail: Some(err.to_string()),
                },
            ),
            ApiError::Aggregate(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "all sources failed".to_string(),
                    detail: Some(err.detail),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
