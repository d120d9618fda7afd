//! API route configuration.

use crate::api::handlers::calculate_handler;
use crate::state::AppState;
use axum::{Router, routing::post};

/// Calculation routes.
///
/// # Endpoints
///
/// - `POST /calculate` - Calculate the packs to ship for an order
pub fn calculate_routes() -> Router<AppState> {
    Router::new().route("/calculate", post(calculate_handler))
}
