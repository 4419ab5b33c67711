//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`  - Storage health check (never rate limited)
//! - `/users/*`, `/courses/*`, `/enrollments/*` - Resource API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the resource API (optional)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and per-route middleware, without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - per-IP limiter for the resource API; `None` disables it
pub fn router(state: AppState, rate_limit: Option<RateLimitLayer>) -> Router {
    let mut api_router = api::routes::api_routes();
    if let Some(rate_limit) = rate_limit {
        api_router = api_router.layer(rate_limit);
    }

    Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so `/users/` and `/users`
/// reach the same handler.
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, rate_limit))
}
