//! Authentication middleware
//!
//! This module provides bearer-token authorization for admin endpoints.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};
use crate::router::AppState;
use crate::utils::errors::{BandVoteError, Result};

/// Authentication middleware
#[derive(Clone)]
pub struct AuthMiddleware {
    api_token: String,
}

impl AuthMiddleware {
    /// Create a new AuthMiddleware instance
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
        }
    }

    /// Compare tokens without short-circuiting on the first differing byte
    fn token_matches(&self, candidate: &str) -> bool {
        let expected = self.api_token.as_bytes();
        let candidate = candidate.as_bytes();
        if expected.is_empty() || expected.len() != candidate.len() {
            return false;
        }
        expected
            .iter()
            .zip(candidate)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Check that the request carries the admin bearer token
    pub fn check_admin_auth(&self, headers: &HeaderMap) -> Result<()> {
        let token = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .ok_or_else(|| BandVoteError::Authentication("Missing bearer token".to_string()))?;

        if self.token_matches(token) {
            debug!("Admin authentication successful");
            Ok(())
        } else {
            warn!("Unauthorized admin access attempt");
            Err(BandVoteError::Authentication("Invalid admin token".to_string()))
        }
    }
}

/// Axum middleware guarding `/api/admin` routes
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    match state.auth.check_admin_auth(request.headers()) {
        Ok(()) => next.run(request).await,
        Err(e) => e.into_response(),
    }
}
