//! Handler for health check endpoint.

use axum::{Json, extract::State};

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;

/// Returns service status and the active calculation defaults.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// ```json
/// {
///   "status": "ok",
///   "version": "0.1.0",
///   "default_pack_sizes": [250, 500, 1000, 2000, 5000],
///   "max_items": 1000000
/// }
/// ```
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        default_pack_sizes: state.pack_service.default_pack_sizes().to_vec(),
        max_items: state.pack_service.limits().max_items,
    })
}
