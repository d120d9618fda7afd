//! Rate limiting middleware using token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-IP governor layer applied to calculation routes.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter for the calculation endpoint.
///
/// # Limits
///
/// - **Replenish**: one request token every `replenish_ms` milliseconds
/// - **Burst**: up to `burst` requests at once
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the socket
/// peer address, so the server must be run with connect info.
///
/// # Errors
///
/// Returns an error if either value is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/calculate", post(calculate_handler))
///     .layer(rate_limit::layer(100, 50)?);
/// ```
pub fn layer(replenish_ms: u64, burst: u32) -> Result<RateLimitLayer> {
    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst)
        .finish()
        .context("Rate limit replenish interval and burst size must be greater than 0")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
