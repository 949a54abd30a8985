//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{BandVoteError, Result};
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_server_config(&settings.server)?;
    validate_database_config(&settings.database)?;
    validate_voting_config(&settings.voting)?;
    validate_photos_config(&settings.photos)?;
    validate_rate_limit_config(&settings.rate_limit)?;
    validate_admin_config(&settings.admin)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate server configuration
fn validate_server_config(config: &super::ServerConfig) -> Result<()> {
    if config.host.is_empty() {
        return Err(BandVoteError::Config(
            "Server host is required".to_string()
        ));
    }

    if config.port == 0 {
        return Err(BandVoteError::Config(
            "Server port must be greater than 0".to_string()
        ));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(BandVoteError::Config(
            "Database URL is required".to_string()
        ));
    }

    if config.max_connections == 0 {
        return Err(BandVoteError::Config(
            "Max connections must be greater than 0".to_string()
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(BandVoteError::Config(
            "Min connections cannot be greater than max connections".to_string()
        ));
    }

    if config.acquire_timeout_secs == 0 {
        return Err(BandVoteError::Config(
            "Database acquire timeout must be greater than 0 seconds".to_string()
        ));
    }

    Ok(())
}

/// Validate voting configuration
fn validate_voting_config(config: &super::VotingConfig) -> Result<()> {
    if config.cookie_max_age_days <= 0 {
        return Err(BandVoteError::Config(
            "Vote cookie max age must be greater than 0 days".to_string()
        ));
    }

    if !(0.0..=1.0).contains(&config.min_visitor_confidence) {
        return Err(BandVoteError::Config(
            format!("Visitor confidence threshold must be within 0..=1, got {}", config.min_visitor_confidence)
        ));
    }

    Ok(())
}

/// Validate photo listing configuration
fn validate_photos_config(config: &super::PhotosConfig) -> Result<()> {
    if config.default_page_size == 0 || config.max_page_size == 0 {
        return Err(BandVoteError::Config(
            "Photo page sizes must be greater than 0".to_string()
        ));
    }

    if config.default_page_size > config.max_page_size {
        return Err(BandVoteError::Config(
            "Default photo page size cannot be greater than max page size".to_string()
        ));
    }

    if config.near_duplicate_threshold > 64 {
        return Err(BandVoteError::Config(
            "Near-duplicate threshold cannot exceed 64 bits".to_string()
        ));
    }

    Ok(())
}

/// Validate rate limit configuration
fn validate_rate_limit_config(config: &super::RateLimitSettings) -> Result<()> {
    if config.enabled && config.votes_per_minute == 0 {
        return Err(BandVoteError::Config(
            "Votes per minute must be greater than 0 when rate limiting is enabled".to_string()
        ));
    }

    Ok(())
}

/// Validate admin configuration
fn validate_admin_config(config: &super::AdminConfig) -> Result<()> {
    if config.api_token.is_empty() {
        return Err(BandVoteError::Config(
            "Admin API token is required".to_string()
        ));
    }

    if config.api_token.len() < 16 {
        return Err(BandVoteError::Config(
            "Admin API token must be at least 16 characters".to_string()
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(BandVoteError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(BandVoteError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    Ok(())
}
