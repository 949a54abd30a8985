//! Data models module
//!
//! This module contains all data structures used throughout the application

pub mod event;
pub mod band;
pub mod vote;
pub mod photo;

// Re-export commonly used models
pub use event::{Event, EventStatus, UpdateEventStatusRequest, BandTally};
pub use band::Band;
pub use vote::{Vote, VoteStatus, SubmitVoteRequest, CreateVoteRequest};
pub use photo::{Photo, PhotoFilter};
