//! Services module
//!
//! This module contains business logic services

pub mod event;
pub mod fingerprint;
pub mod near_duplicate;
pub mod photo;
pub mod shuffle;
pub mod vote;

// Re-export commonly used services
pub use event::EventService;
pub use fingerprint::{compute_vote_fingerprint, fingerprint_date};
pub use near_duplicate::{are_similar, group_near_duplicates, hamming_distance, DuplicateGroup};
pub use photo::{PhotoPage, PhotoQuery, PhotoService};
pub use shuffle::{seeded_shuffle, time_based_seed, Mulberry32};
pub use vote::{DuplicateMatch, DuplicateSignal, VoteDecision, VoteOutcome, VoteService, VoteSubmission};

use std::sync::Arc;
use crate::config::settings::Settings;
use crate::database::store::{EventStore, PhotoStore, VoteStore};

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub event_service: EventService,
    pub vote_service: VoteService,
    pub photo_service: PhotoService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(
        settings: &Settings,
        events: Arc<dyn EventStore>,
        votes: Arc<dyn VoteStore>,
        photos: Arc<dyn PhotoStore>,
    ) -> Self {
        Self {
            event_service: EventService::new(events.clone()),
            vote_service: VoteService::new(events, votes, settings.voting.clone()),
            photo_service: PhotoService::new(photos, settings.photos.clone()),
        }
    }
}
