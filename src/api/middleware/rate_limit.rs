//! Rate limiting middleware using token bucket algorithm.

use anyhow::Context;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::PeerIpKeyExtractor,
};

/// Per-client-IP rate limiting layer.
pub type RateLimitLayer =
    GovernorLayer<PeerIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter keyed by client IP.
///
/// Each client starts with `burst_size` requests and regains
/// `per_second` of them every second. Requests exceeding the limit receive
/// `429 Too Many Requests`.
///
/// # Key Extraction
///
/// Rate limits are applied per client IP address extracted from the
/// socket peer address, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`.
///
/// # Errors
///
/// Returns an error if `per_second` or `burst_size` is zero.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/users", resource_routes::<UserSvc>())
///     .layer(rate_limit::layer(5, 50)?);
/// ```
pub fn layer(per_second: u64, burst_size: u32) -> anyhow::Result<RateLimitLayer> {
    anyhow::ensure!(per_second > 0, "rate limit must be at least 1 request per second");

    let replenish_ms = (1000 / per_second).max(1);

    let governor_conf = GovernorConfigBuilder::default()
        .per_millisecond(replenish_ms)
        .burst_size(burst_size)
        .finish()
        .context("Invalid rate limit configuration")?;

    Ok(GovernorLayer::new(Arc::new(governor_conf)))
}
