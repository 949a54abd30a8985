//! Database module
//!
//! This module handles database connections and operations

pub mod connection;
pub mod repositories;
pub mod service;
pub mod store;

// Re-export commonly used database components
pub use connection::{DatabasePool, create_pool, pool_options, run_migrations, health_check};
pub use repositories::{EventRepository, VoteRepository, PhotoRepository};
pub use service::DatabaseService;
pub use store::{EventStore, VoteStore, PhotoStore};
