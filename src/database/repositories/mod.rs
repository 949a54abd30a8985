//! Database repositories module
//!
//! This module contains all repository implementations for data access

pub mod event;
pub mod vote;
pub mod photo;

// Re-export repositories
pub use event::EventRepository;
pub use vote::VoteRepository;
pub use photo::PhotoRepository;
