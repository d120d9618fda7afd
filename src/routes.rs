//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /calculate`  - Pack calculation (rate limited)
//! - `GET  /health`     - Service status and defaults
//! - `/*`               - Static UI assets from `STATIC_DIR`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Timeout** - Requests exceeding `REQUEST_TIMEOUT` receive `408`
//! - **Rate limiting** - Per-IP token bucket on `/calculate`
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `config` - supplies rate limit, timeout and static directory settings
///
/// # Errors
///
/// Returns an error if the rate limiter cannot be built from `config`.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let mut api_router = api::routes::calculate_routes();
    if config.rate_limit_enabled {
        api_router = api_router.layer(rate_limit::layer(
            config.rate_limit_replenish_ms,
            config.rate_limit_burst,
        )?);
    }

    let timeout =
        TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, config.request_timeout());

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(api_router)
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(timeout)
        .layer(tracing::layer());

    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}
