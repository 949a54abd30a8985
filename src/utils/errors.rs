//! Error handling for BandVote
//!
//! This module defines the main error type used throughout the application,
//! its HTTP mapping, and a unified error handling strategy.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for BandVote application
#[derive(Error, Debug)]
pub enum BandVoteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Event not found: {event_id}")]
    EventNotFound { event_id: Uuid },

    #[error("Band not found for this event: {band_id}")]
    BandNotFound { band_id: Uuid },

    #[error("Voting is not open for this event")]
    VotingClosed { event_id: Uuid, status: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Result type alias for BandVote operations
pub type Result<T> = std::result::Result<T, BandVoteError>;

impl BandVoteError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BandVoteError::Database(_) => ErrorSeverity::Critical,
            BandVoteError::Migration(_) => ErrorSeverity::Critical,
            BandVoteError::Config(_) => ErrorSeverity::Critical,
            BandVoteError::ConfigLoad(_) => ErrorSeverity::Critical,
            BandVoteError::Authentication(_) => ErrorSeverity::Warning,
            BandVoteError::RateLimitExceeded => ErrorSeverity::Warning,
            BandVoteError::ServiceUnavailable(_) => ErrorSeverity::Warning,
            BandVoteError::InvalidInput(_) => ErrorSeverity::Info,
            BandVoteError::EventNotFound { .. } => ErrorSeverity::Info,
            BandVoteError::BandNotFound { .. } => ErrorSeverity::Info,
            BandVoteError::VotingClosed { .. } => ErrorSeverity::Info,
            BandVoteError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// HTTP status returned to the caller
    pub fn status_code(&self) -> StatusCode {
        match self {
            BandVoteError::EventNotFound { .. } => StatusCode::NOT_FOUND,
            BandVoteError::BandNotFound { .. } => StatusCode::BAD_REQUEST,
            BandVoteError::VotingClosed { .. } => StatusCode::BAD_REQUEST,
            BandVoteError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            BandVoteError::Authentication(_) => StatusCode::UNAUTHORIZED,
            BandVoteError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            BandVoteError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to a caller. Internal failures get a generic text.
    pub fn public_message(&self) -> String {
        match self.status_code() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

/// Malformed or mistyped request bodies become a JSON 400
impl From<JsonRejection> for BandVoteError {
    fn from(rejection: JsonRejection) -> Self {
        BandVoteError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for BandVoteError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, severity = %self.severity(), "Request failed");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
