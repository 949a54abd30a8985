//! Event repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::database::connection::health_check;
use crate::database::store::EventStore;
use crate::models::{Band, BandTally, Event, EventStatus};
use crate::utils::errors::BandVoteError;

const EVENT_COLUMNS: &str = "id, name, date, location, status, created_at, updated_at";
const BAND_COLUMNS: &str = "id, event_id, name, description, running_order, image_url, created_at";

#[derive(Debug, Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn ping(&self) -> Result<(), BandVoteError> {
        health_check(&self.pool).await
    }

    /// List events, most recent first
    async fn list_events(&self) -> Result<Vec<Event>, BandVoteError> {
        let events = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events ORDER BY date DESC",
            EVENT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(events)
    }

    /// Find event by ID
    async fn find_event(&self, event_id: Uuid) -> Result<Option<Event>, BandVoteError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {} FROM events WHERE id = $1",
            EVENT_COLUMNS
        ))
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn update_event_status(&self, event_id: Uuid, status: EventStatus) -> Result<Option<Event>, BandVoteError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            UPDATE events
            SET status = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING {}
            "#,
            EVENT_COLUMNS
        ))
        .bind(event_id)
        .bind(status.as_str())
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    async fn list_bands(&self, event_id: Uuid) -> Result<Vec<Band>, BandVoteError> {
        let bands = sqlx::query_as::<_, Band>(&format!(
            "SELECT {} FROM bands WHERE event_id = $1 ORDER BY running_order ASC, name ASC",
            BAND_COLUMNS
        ))
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(bands)
    }

    async fn find_band(&self, event_id: Uuid, band_id: Uuid) -> Result<Option<Band>, BandVoteError> {
        let band = sqlx::query_as::<_, Band>(&format!(
            "SELECT {} FROM bands WHERE id = $1 AND event_id = $2",
            BAND_COLUMNS
        ))
        .bind(band_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(band)
    }

    async fn vote_tally(&self, event_id: Uuid) -> Result<Vec<BandTally>, BandVoteError> {
        let tally = sqlx::query_as::<_, BandTally>(
            r#"
            SELECT b.id AS band_id, b.name AS band_name, b.running_order, COUNT(v.id) AS votes
            FROM bands b
            LEFT JOIN votes v ON v.band_id = b.id AND v.event_id = b.event_id AND v.status = 'approved'
            WHERE b.event_id = $1
            GROUP BY b.id, b.name, b.running_order
            ORDER BY votes DESC, b.running_order ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tally)
    }
}
