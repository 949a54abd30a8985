//! Middleware module
//!
//! This module contains middleware for request processing

pub mod auth;
pub mod logging;
pub mod rate_limit;

// Re-export commonly used middleware
pub use auth::{AuthMiddleware, require_admin};
pub use logging::log_requests;
pub use rate_limit::{RateLimitMiddleware, limit_votes};
