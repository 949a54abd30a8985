//! Event, band and results service

use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use crate::database::store::EventStore;
use crate::models::{Band, BandTally, Event, EventStatus};
use crate::utils::errors::{BandVoteError, Result};
use crate::utils::logging::log_admin_action;

#[derive(Clone)]
pub struct EventService {
    events: Arc<dyn EventStore>,
}

impl EventService {
    pub fn new(events: Arc<dyn EventStore>) -> Self {
        Self { events }
    }

    pub async fn health_check(&self) -> Result<()> {
        self.events.ping().await
    }

    pub async fn list_events(&self) -> Result<Vec<Event>> {
        self.events.list_events().await
    }

    pub async fn get_event(&self, event_id: Uuid) -> Result<Event> {
        self.events.find_event(event_id).await?
            .ok_or(BandVoteError::EventNotFound { event_id })
    }

    pub async fn list_bands(&self, event_id: Uuid) -> Result<Vec<Band>> {
        self.get_event(event_id).await?;
        self.events.list_bands(event_id).await
    }

    /// Approved votes per band
    pub async fn results(&self, event_id: Uuid) -> Result<Vec<BandTally>> {
        self.get_event(event_id).await?;
        self.events.vote_tally(event_id).await
    }

    pub async fn set_status(&self, event_id: Uuid, status: EventStatus) -> Result<Event> {
        let event = self.events.update_event_status(event_id, status).await?
            .ok_or(BandVoteError::EventNotFound { event_id })?;

        log_admin_action("set_event_status", Some(&event_id.to_string()), Some(status.as_str()));
        info!(event_id = %event_id, status = %status, "Event status changed");
        Ok(event)
    }
}
