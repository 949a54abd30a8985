//! BandVote
//!
//! Backend for the Battle of the Tech Bands charity event: crowd voting with
//! duplicate-vote detection, deterministic photo shuffling, and the event,
//! band and results endpoints that go with them.

pub mod config;
pub mod database;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use crate::config::Settings;
pub use utils::errors::{BandVoteError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use router::{create_router, AppState};
pub use services::{compute_vote_fingerprint, seeded_shuffle, time_based_seed, ServiceFactory};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
