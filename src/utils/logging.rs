//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the BandVote application.

use tracing::{info, warn, debug, error};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use crate::config::LoggingConfig;
use crate::services::DuplicateSignal;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard flushes the file writer and must live as long as the process.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    let guard = match &config.file_path {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "bandvote.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
                .with(tracing_subscriber::fmt::layer().json().with_writer(non_blocking))
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
                .init();
            None
        }
    };

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log an accepted vote submission
pub fn log_vote_recorded(vote_id: Uuid, event_id: Uuid, band_id: Uuid, status: &str) {
    info!(
        vote_id = %vote_id,
        event_id = %event_id,
        band_id = %band_id,
        status = status,
        "Vote recorded"
    );
}

/// Log a vote that was held for review
pub fn log_duplicate_vote(event_id: Uuid, signal: DuplicateSignal, existing_vote_id: Uuid, has_email: bool) {
    warn!(
        event_id = %event_id,
        signal = %signal,
        existing_vote_id = %existing_vote_id,
        has_email = has_email,
        "Duplicate vote detected, holding for review"
    );
}

/// Log admin actions
pub fn log_admin_action(action: &str, target: Option<&str>, details: Option<&str>) {
    warn!(
        action = action,
        target = target,
        details = details,
        "Admin action performed"
    );
}

/// Log database operations
pub fn log_database_operation(operation: &str, table: &str, duration_ms: u64, success: bool) {
    if success {
        debug!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation completed"
        );
    } else {
        error!(
            operation = operation,
            table = table,
            duration_ms = duration_ms,
            "Database operation failed"
        );
    }
}
