//! Storage traits used by the service layer
//!
//! Repositories implement these against Postgres; tests can supply
//! in-memory implementations.

use async_trait::async_trait;
use uuid::Uuid;
use crate::models::{Band, BandTally, CreateVoteRequest, Event, EventStatus, Photo, PhotoFilter, Vote};
use crate::utils::errors::Result;

#[async_trait]
pub trait EventStore: Send + Sync {
    /// Check that the backing store answers queries
    async fn ping(&self) -> Result<()>;

    async fn list_events(&self) -> Result<Vec<Event>>;

    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>>;

    async fn update_event_status(&self, event_id: Uuid, status: EventStatus) -> Result<Option<Event>>;

    /// Bands of an event by running order
    async fn list_bands(&self, event_id: Uuid) -> Result<Vec<Band>>;

    async fn find_band(&self, event_id: Uuid, band_id: Uuid) -> Result<Option<Band>>;

    /// Approved vote counts for every band of the event
    async fn vote_tally(&self, event_id: Uuid) -> Result<Vec<BandTally>>;
}

#[async_trait]
pub trait VoteStore: Send + Sync {
    async fn find_vote(&self, event_id: Uuid, vote_id: Uuid) -> Result<Option<Vote>>;

    /// `email` is already normalized; comparison is case-insensitive
    async fn find_approved_by_email(&self, event_id: Uuid, email: &str) -> Result<Option<Vote>>;

    async fn find_by_visitor_id(&self, event_id: Uuid, visitor_id: &str) -> Result<Option<Vote>>;

    async fn find_by_fingerprint(&self, event_id: Uuid, fingerprint: &str) -> Result<Option<Vote>>;

    async fn create_vote(&self, request: CreateVoteRequest) -> Result<Vote>;

    async fn update_vote_band(&self, vote_id: Uuid, band_id: Uuid) -> Result<Vote>;
}

#[async_trait]
pub trait PhotoStore: Send + Sync {
    /// Matching photos in stable order: newest upload first, then id
    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>>;
}
