//! Test helpers module
//!
//! In-memory storage, a test context that drives the HTTP router, and a
//! PostgreSQL test database for repository tests.

pub mod test_context;

pub use database_helper::*;
pub use memory_store::*;
pub use test_context::*;
