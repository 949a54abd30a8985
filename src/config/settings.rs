//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::time::Duration;
use serde::{Deserialize, Serialize};
use crate::utils::errors::Result;

/// Main application configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub voting: VotingConfig,
    pub photos: PhotosConfig,
    pub rate_limit: RateLimitSettings,
    pub admin: AdminConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Take the client address from `X-Forwarded-For` / `X-Real-IP`.
    /// Only enable behind a reverse proxy that overwrites these headers.
    pub trust_proxy_headers: bool,
}

/// Database connection pool configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    /// Close connections idle for longer than this; never when absent
    pub idle_timeout_secs: Option<u64>,
    /// Recycle connections older than this; never when absent
    pub max_lifetime_secs: Option<u64>,
}

impl DatabaseConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Option<Duration> {
        self.idle_timeout_secs.map(Duration::from_secs)
    }

    pub fn max_lifetime(&self) -> Option<Duration> {
        self.max_lifetime_secs.map(Duration::from_secs)
    }
}

/// Vote submission configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VotingConfig {
    /// Lifetime of the first-vote and band cookies
    pub cookie_max_age_days: i64,
    /// Visitor IDs reported below this confidence are ignored for deduplication
    pub min_visitor_confidence: f64,
    pub secure_cookies: bool,
}

/// Photo listing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotosConfig {
    pub default_page_size: u32,
    pub max_page_size: u32,
    /// Maximum Hamming distance for two perceptual hashes to count as near-duplicates
    pub near_duplicate_threshold: u32,
}

/// Vote rate limiting configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RateLimitSettings {
    pub enabled: bool,
    pub votes_per_minute: u32,
    pub burst: u32,
}

/// Admin API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AdminConfig {
    pub api_token: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for the daily rolling log file; stdout only when absent
    pub file_path: Option<String>,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self> {
        Self::load("config")
    }

    /// Load settings from the named file (extension optional) layered over
    /// defaults, then `BANDVOTE_*` environment variables
    pub fn load(file: &str) -> Result<Self> {
        let defaults = Settings::default();

        let settings = config::Config::builder()
            .add_source(config::Config::try_from(&defaults)?)
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix("BANDVOTE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<()> {
        super::validation::validate_settings(self)
    }

    /// Socket address the HTTP server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                trust_proxy_headers: false,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/bandvote".to_string(),
                max_connections: 10,
                min_connections: 1,
                acquire_timeout_secs: 30,
                idle_timeout_secs: Some(600),
                max_lifetime_secs: Some(1800),
            },
            voting: VotingConfig {
                cookie_max_age_days: 30,
                min_visitor_confidence: 0.5,
                secure_cookies: true,
            },
            photos: PhotosConfig {
                default_page_size: 50,
                max_page_size: 200,
                near_duplicate_threshold: 10,
            },
            rate_limit: RateLimitSettings {
                enabled: true,
                votes_per_minute: 10,
                burst: 5,
            },
            admin: AdminConfig {
                api_token: String::new(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                file_path: None,
            },
        }
    }
}
