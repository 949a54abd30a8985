//! Rate limiting middleware
//!
//! This module limits vote submissions per client address to blunt scripted
//! ballot stuffing before any database work happens.

use std::num::NonZeroU32;
use std::sync::Arc;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use tracing::{debug, warn};
use crate::config::RateLimitSettings;
use crate::router::AppState;
use crate::utils::errors::{BandVoteError, Result};
use crate::utils::request::{client_ip, peer_addr};

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Sustained requests per minute
    pub per_minute: NonZeroU32,
    /// Requests allowed at once before the sustained rate applies
    pub burst: NonZeroU32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_minute: NonZeroU32::new(10).unwrap_or(NonZeroU32::MIN),
            burst: NonZeroU32::new(5).unwrap_or(NonZeroU32::MIN),
        }
    }
}

impl From<&RateLimitSettings> for RateLimitConfig {
    fn from(settings: &RateLimitSettings) -> Self {
        Self {
            per_minute: NonZeroU32::new(settings.votes_per_minute).unwrap_or(NonZeroU32::MIN),
            burst: NonZeroU32::new(settings.burst).unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Rate limiting middleware keyed by client address
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    enabled: bool,
}

impl RateLimitMiddleware {
    /// Create a new RateLimitMiddleware instance
    pub fn new(config: RateLimitConfig, enabled: bool) -> Self {
        let quota = Quota::per_minute(config.per_minute).allow_burst(config.burst);

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            enabled,
        }
    }

    pub fn from_settings(settings: &RateLimitSettings) -> Self {
        Self::new(RateLimitConfig::from(settings), settings.enabled)
    }

    /// Check if a client is rate limited
    pub fn check_rate_limit(&self, client: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        match self.limiter.check_key(&client.to_string()) {
            Ok(()) => {
                debug!(client = client, "Rate limit check passed");
                Ok(())
            }
            Err(_) => {
                warn!(client = client, "Rate limit exceeded");
                Err(BandVoteError::RateLimitExceeded)
            }
        }
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }

    /// Cleanup old entries (should be called periodically)
    pub fn cleanup_old_entries(&self) {
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        debug!(remaining_entries = self.limiter.len(), "Cleaned up old rate limit entries");
    }
}

impl Default for RateLimitMiddleware {
    fn default() -> Self {
        Self::new(RateLimitConfig::default(), true)
    }
}

/// Axum middleware rejecting over-limit vote submissions with 429
pub async fn limit_votes(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let client = client_ip(request.headers(), peer_addr(request.extensions()), state.trust_proxy_headers);

    match state.rate_limiter.check_rate_limit(&client) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
