//! Handler for the pack calculation endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::calculate::{CalculateRequest, CalculateResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Calculates the packs to ship for an order.
///
/// # Endpoint
///
/// `POST /calculate`
///
/// # Request Body
///
/// ```json
/// {
///   "items": 12001,
///   "pack_sizes": [250, 500, 1000, 2000, 5000]  // optional
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "items_ordered": 12001,
///   "items_shipped": 12250,
///   "packs": { "250": 1, "2000": 1, "5000": 2 },
///   "total_packs": 4
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request for malformed JSON, unknown fields, `items` out of
/// range, or invalid pack sizes. The solver runs on the blocking thread pool.
///
/// A request timeout answers `408` but does not cancel a solve already on the
/// blocking pool; it runs to completion and its result is dropped. The
/// configured limits bound how long that can take.
pub async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Result<Json<CalculateResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let service = state.pack_service.clone();
    let plan = tokio::task::spawn_blocking(move || {
        service.calculate(payload.items, payload.pack_sizes)
    })
    .await
    .map_err(|e| {
        AppError::internal(
            "Calculation task failed",
            json!({ "reason": e.to_string() }),
        )
    })??;

    Ok(Json(plan.into()))
}
