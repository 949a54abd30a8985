//! Database service layer
//!
//! Bundles the Postgres-backed repositories behind the store traits the
//! services depend on.

use std::sync::Arc;
use crate::database::{DatabasePool, EventRepository, PhotoRepository, VoteRepository};
use crate::database::store::{EventStore, PhotoStore, VoteStore};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub events: EventRepository,
    pub votes: VoteRepository,
    pub photos: PhotoRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            events: EventRepository::new(pool.clone()),
            votes: VoteRepository::new(pool.clone()),
            photos: PhotoRepository::new(pool),
        }
    }

    pub fn event_store(&self) -> Arc<dyn EventStore> {
        Arc::new(self.events.clone())
    }

    pub fn vote_store(&self) -> Arc<dyn VoteStore> {
        Arc::new(self.votes.clone())
    }

    pub fn photo_store(&self) -> Arc<dyn PhotoStore> {
        Arc::new(self.photos.clone())
    }
}
