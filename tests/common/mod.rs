#![allow(dead_code)]

use axum::Router;
use axum::routing::{get, post};
use pack_calculator::api::handlers::{calculate_handler, health_handler};
use pack_calculator::application::services::{PackLimits, PackService};
use pack_calculator::config::{Config, DEFAULT_PACK_SIZES};
use pack_calculator::domain::solver::DpSolver;
use pack_calculator::state::AppState;
use std::sync::Arc;

pub fn create_test_state() -> AppState {
    create_test_state_with(DEFAULT_PACK_SIZES.to_vec(), PackLimits::default())
}

pub fn create_test_state_with(default_pack_sizes: Vec<i64>, limits: PackLimits) -> AppState {
    AppState::new(Arc::new(PackService::new(
        DpSolver,
        default_pack_sizes,
        limits,
    )))
}

/// Handler-only router, without middleware.
pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Configuration for full-router tests; rate limiting needs connect info,
/// which in-process requests do not carry.
pub fn test_config() -> Config {
    Config {
        rate_limit_enabled: false,
        static_dir: concat!(env!("CARGO_MANIFEST_DIR"), "/static").to_string(),
        ..Config::default()
    }
}
