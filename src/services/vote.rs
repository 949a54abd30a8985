//! Vote submission service
//!
//! Validates a crowd vote, decides whether it duplicates an earlier vote of
//! the same event, and stores it as `approved` or `pending`.
//!
//! Duplicate signals are checked in a fixed order and the first match wins:
//!
//! 1. [`DuplicateSignal::Email`]: an approved vote with the same email.
//! 2. [`DuplicateSignal::VisitorId`]: any vote with the same device visitor ID,
//!    when the client reported it with enough confidence.
//! 3. [`DuplicateSignal::Fingerprint`]: any vote with the same vote fingerprint.
//!
//! A signal is skipped when its input is missing. A valid first-vote cookie
//! bypasses detection entirely and changes the band of the voter's earlier vote.

use std::fmt;
use std::sync::Arc;
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;
use crate::config::VotingConfig;
use crate::database::store::{EventStore, VoteStore};
use crate::models::{CreateVoteRequest, SubmitVoteRequest, Vote, VoteStatus};
use crate::services::fingerprint::{compute_vote_fingerprint, fingerprint_date};
use crate::utils::errors::{BandVoteError, Result};
use crate::utils::helpers::{clean_optional, is_valid_email, normalize_email};
use crate::utils::logging::{log_duplicate_vote, log_vote_recorded};
use crate::utils::request::UtmParams;

/// Which piece of evidence identified a duplicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateSignal {
    Email,
    VisitorId,
    Fingerprint,
}

impl fmt::Display for DuplicateSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateSignal::Email => write!(f, "email"),
            DuplicateSignal::VisitorId => write!(f, "visitor_id"),
            DuplicateSignal::Fingerprint => write!(f, "fingerprint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateMatch {
    pub signal: DuplicateSignal,
    pub existing_vote_id: Uuid,
}

/// Evidence available for duplicate detection
#[derive(Debug, Clone)]
pub struct VoteEvidence {
    pub email: Option<String>,
    pub visitor_id: Option<String>,
    pub fingerprint: String,
}

/// Everything the service needs from one HTTP request
#[derive(Debug, Clone)]
pub struct VoteSubmission {
    pub request: SubmitVoteRequest,
    pub ip_address: String,
    pub user_agent: String,
    pub utm: UtmParams,
    /// Value of the event's first-vote cookie, if the client sent one
    pub first_vote_cookie: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDecision {
    /// No duplicate found
    Approved,
    /// Duplicate found; stored for manual review
    HeldForReview { signal: DuplicateSignal, has_email: bool },
    /// First-vote cookie matched; the earlier vote now points at the new band
    Updated,
}

impl VoteDecision {
    pub fn http_status(&self) -> StatusCode {
        match self {
            VoteDecision::Approved | VoteDecision::Updated => StatusCode::OK,
            VoteDecision::HeldForReview { has_email: true, .. } => StatusCode::CREATED,
            VoteDecision::HeldForReview { has_email: false, .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn duplicate_detected(&self) -> bool {
        matches!(self, VoteDecision::HeldForReview { .. })
    }
}

#[derive(Debug, Clone)]
pub struct VoteOutcome {
    pub vote: Vote,
    pub decision: VoteDecision,
}

/// Status a new vote is stored with
pub fn status_for(duplicate: Option<&DuplicateMatch>) -> VoteStatus {
    match duplicate {
        Some(_) => VoteStatus::Pending,
        None => VoteStatus::Approved,
    }
}

#[derive(Clone)]
pub struct VoteService {
    events: Arc<dyn EventStore>,
    votes: Arc<dyn VoteStore>,
    config: VotingConfig,
}

impl VoteService {
    pub fn new(events: Arc<dyn EventStore>, votes: Arc<dyn VoteStore>, config: VotingConfig) -> Self {
        Self { events, votes, config }
    }

    /// Name of the HttpOnly cookie remembering a voter's first vote
    pub fn first_vote_cookie_name(event_id: Uuid) -> String {
        format!("voted_{}", event_id)
    }

    /// Name of the script-readable cookie remembering the chosen band
    pub fn band_cookie_name(event_id: Uuid) -> String {
        format!("voted_band_{}", event_id)
    }

    pub fn cookie_max_age_seconds(&self) -> i64 {
        self.config.cookie_max_age_days * 24 * 60 * 60
    }

    pub fn secure_cookies(&self) -> bool {
        self.config.secure_cookies
    }

    /// Visitor IDs are trusted unless the client reported a confidence below the threshold
    fn trusted_visitor_id(&self, request: &SubmitVoteRequest) -> Option<String> {
        let visitor_id = clean_optional(request.fingerprintjs_visitor_id.as_deref())?;
        match request.fingerprintjs_confidence {
            Some(confidence) if confidence < self.config.min_visitor_confidence => {
                debug!(confidence = confidence, "Ignoring low-confidence visitor ID");
                None
            }
            _ => Some(visitor_id),
        }
    }

    /// Run the duplicate signals in precedence order
    pub async fn detect_duplicate(&self, event_id: Uuid, evidence: &VoteEvidence) -> Result<Option<DuplicateMatch>> {
        if let Some(email) = &evidence.email {
            if let Some(existing) = self.votes.find_approved_by_email(event_id, email).await? {
                return Ok(Some(DuplicateMatch { signal: DuplicateSignal::Email, existing_vote_id: existing.id }));
            }
        }

        if let Some(visitor_id) = &evidence.visitor_id {
            if let Some(existing) = self.votes.find_by_visitor_id(event_id, visitor_id).await? {
                return Ok(Some(DuplicateMatch { signal: DuplicateSignal::VisitorId, existing_vote_id: existing.id }));
            }
        }

        if let Some(existing) = self.votes.find_by_fingerprint(event_id, &evidence.fingerprint).await? {
            return Ok(Some(DuplicateMatch { signal: DuplicateSignal::Fingerprint, existing_vote_id: existing.id }));
        }

        Ok(None)
    }

    /// Validate and store a crowd vote
    pub async fn submit(&self, submission: VoteSubmission) -> Result<VoteOutcome> {
        let request = &submission.request;
        let event_id = request.event_id;

        let event = self.events.find_event(event_id).await?
            .ok_or(BandVoteError::EventNotFound { event_id })?;

        if !event.is_voting_open() {
            return Err(BandVoteError::VotingClosed { event_id, status: event.status.clone() });
        }

        self.events.find_band(event_id, request.band_id).await?
            .ok_or(BandVoteError::BandNotFound { band_id: request.band_id })?;

        let email = normalize_email(request.email.as_deref());
        if let Some(email) = &email {
            if !is_valid_email(email) {
                return Err(BandVoteError::InvalidInput("Invalid email address".to_string()));
            }
        }

        if let Some(previous) = self.previous_vote(event_id, submission.first_vote_cookie.as_deref()).await? {
            let vote = self.votes.update_vote_band(previous.id, request.band_id).await?;
            info!(vote_id = %vote.id, event_id = %event_id, band_id = %vote.band_id, "Vote updated from first-vote cookie");
            return Ok(VoteOutcome { vote, decision: VoteDecision::Updated });
        }

        let fingerprint = compute_vote_fingerprint(
            &submission.ip_address,
            &submission.user_agent,
            &event_id.to_string(),
            &fingerprint_date(submission.submitted_at),
        );

        let evidence = VoteEvidence {
            email: email.clone(),
            visitor_id: self.trusted_visitor_id(request),
            fingerprint: fingerprint.clone(),
        };

        let duplicate = self.detect_duplicate(event_id, &evidence).await?;
        let status = status_for(duplicate.as_ref());

        let vote = self.votes.create_vote(CreateVoteRequest {
            event_id,
            band_id: request.band_id,
            name: clean_optional(request.name.as_deref()),
            email,
            ip_address: submission.ip_address.clone(),
            user_agent: submission.user_agent.clone(),
            vote_fingerprint: fingerprint,
            fingerprintjs_visitor_id: clean_optional(request.fingerprintjs_visitor_id.as_deref()),
            fingerprintjs_confidence: request.fingerprintjs_confidence,
            status,
            utm_source: submission.utm.utm_source.clone(),
            utm_medium: submission.utm.utm_medium.clone(),
            utm_campaign: submission.utm.utm_campaign.clone(),
        }).await?;

        let decision = match duplicate {
            Some(found) => {
                let has_email = evidence.email.is_some();
                log_duplicate_vote(event_id, found.signal, found.existing_vote_id, has_email);
                VoteDecision::HeldForReview { signal: found.signal, has_email }
            }
            None => VoteDecision::Approved,
        };

        log_vote_recorded(vote.id, event_id, vote.band_id, vote.status.as_str());
        Ok(VoteOutcome { vote, decision })
    }

    /// Earlier vote named by the first-vote cookie; stale or foreign cookies are ignored
    async fn previous_vote(&self, event_id: Uuid, cookie: Option<&str>) -> Result<Option<Vote>> {
        let Some(vote_id) = cookie.and_then(|c| Uuid::parse_str(c).ok()) else {
            return Ok(None);
        };
        self.votes.find_vote(event_id, vote_id).await
    }
}
