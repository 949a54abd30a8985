//! Vote repository implementation

use std::time::Instant;
use async_trait::async_trait;
use sqlx::PgPool;
use chrono::Utc;
use uuid::Uuid;
use crate::database::store::VoteStore;
use crate::models::{CreateVoteRequest, Vote};
use crate::utils::errors::BandVoteError;
use crate::utils::logging::log_database_operation;

const VOTE_COLUMNS: &str = "id, event_id, band_id, name, email, ip_address, user_agent, vote_fingerprint, \
    fingerprintjs_visitor_id, fingerprintjs_confidence, status, utm_source, utm_medium, utm_campaign, \
    created_at, updated_at";

#[derive(Debug, Clone)]
pub struct VoteRepository {
    pool: PgPool,
}

impl VoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, condition: &str, event_id: Uuid, value: &str) -> Result<Option<Vote>, BandVoteError> {
        let vote = sqlx::query_as::<_, Vote>(&format!(
            "SELECT {} FROM votes WHERE event_id = $1 AND {} ORDER BY created_at ASC LIMIT 1",
            VOTE_COLUMNS, condition
        ))
        .bind(event_id)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vote)
    }
}

#[async_trait]
impl VoteStore for VoteRepository {
    async fn find_vote(&self, event_id: Uuid, vote_id: Uuid) -> Result<Option<Vote>, BandVoteError> {
        let vote = sqlx::query_as::<_, Vote>(&format!(
            "SELECT {} FROM votes WHERE id = $1 AND event_id = $2",
            VOTE_COLUMNS
        ))
        .bind(vote_id)
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(vote)
    }

    async fn find_approved_by_email(&self, event_id: Uuid, email: &str) -> Result<Option<Vote>, BandVoteError> {
        self.find_one("lower(email) = $2 AND status = 'approved'", event_id, email).await
    }

    async fn find_by_visitor_id(&self, event_id: Uuid, visitor_id: &str) -> Result<Option<Vote>, BandVoteError> {
        self.find_one("fingerprintjs_visitor_id = $2", event_id, visitor_id).await
    }

    async fn find_by_fingerprint(&self, event_id: Uuid, fingerprint: &str) -> Result<Option<Vote>, BandVoteError> {
        self.find_one("vote_fingerprint = $2", event_id, fingerprint).await
    }

    /// Insert a vote row
    async fn create_vote(&self, request: CreateVoteRequest) -> Result<Vote, BandVoteError> {
        let started = Instant::now();
        let now = Utc::now();

        let result = sqlx::query_as::<_, Vote>(&format!(
            r#"
            INSERT INTO votes (id, event_id, band_id, name, email, ip_address, user_agent, vote_fingerprint,
                               fingerprintjs_visitor_id, fingerprintjs_confidence, status,
                               utm_source, utm_medium, utm_campaign, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING {}
            "#,
            VOTE_COLUMNS
        ))
        .bind(Uuid::new_v4())
        .bind(request.event_id)
        .bind(request.band_id)
        .bind(request.name)
        .bind(request.email)
        .bind(request.ip_address)
        .bind(request.user_agent)
        .bind(request.vote_fingerprint)
        .bind(request.fingerprintjs_visitor_id)
        .bind(request.fingerprintjs_confidence)
        .bind(request.status.as_str())
        .bind(request.utm_source)
        .bind(request.utm_medium)
        .bind(request.utm_campaign)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await;

        log_database_operation("insert", "votes", started.elapsed().as_millis() as u64, result.is_ok());
        Ok(result?)
    }

    async fn update_vote_band(&self, vote_id: Uuid, band_id: Uuid) -> Result<Vote, BandVoteError> {
        let vote = sqlx::query_as::<_, Vote>(&format!(
            r#"
            UPDATE votes
            SET band_id = $2,
                updated_at = $3
            WHERE id = $1
            RETURNING {}
            "#,
            VOTE_COLUMNS
        ))
        .bind(vote_id)
        .bind(band_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(vote)
    }
}
