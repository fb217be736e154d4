// src/presentation/http/middleware/rate_limit.rs
use ::governor::middleware::NoOpMiddleware;
use axum::body::Body;
use std::sync::OnceLock;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type LoginRateLimitLayer = GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware, Body>;

/// Throttles credential guessing per client IP: a burst of five attempts,
/// then one more every two seconds.
pub fn login_rate_limit_layer() -> Option<LoginRateLimitLayer> {
    static LIMITER: OnceLock<Option<LoginRateLimitLayer>> = OnceLock::new();

    LIMITER
        .get_or_init(|| {
            let mut builder = GovernorConfigBuilder::default();
            builder.per_second(2);
            builder.burst_size(5);
            let Some(config) = builder.key_extractor(SmartIpKeyExtractor).finish() else {
                tracing::error!("invalid login rate limit configuration; limiter disabled");
                return None;
            };
            Some(GovernorLayer::new(config))
        })
        .clone()
}
