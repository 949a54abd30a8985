//! Vote model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vote {
    pub id: Uuid,
    pub event_id: Uuid,
    pub band_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub vote_fingerprint: String,
    pub fingerprintjs_visitor_id: Option<String>,
    pub fingerprintjs_confidence: Option<f64>,
    pub status: String,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vote {
    pub fn status(&self) -> VoteStatus {
        self.status.parse().unwrap_or(VoteStatus::Pending)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteStatus {
    Approved,
    /// Held for manual review by event staff
    Pending,
}

impl VoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteStatus::Approved => "approved",
            VoteStatus::Pending => "pending",
        }
    }
}

impl fmt::Display for VoteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoteStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(VoteStatus::Approved),
            "pending" => Ok(VoteStatus::Pending),
            other => Err(format!("unknown vote status: {}", other)),
        }
    }
}

/// Body of `POST /api/votes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitVoteRequest {
    pub event_id: Uuid,
    pub band_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub fingerprintjs_visitor_id: Option<String>,
    #[serde(default)]
    pub fingerprintjs_confidence: Option<f64>,
}

/// Row to insert into `votes`
#[derive(Debug, Clone)]
pub struct CreateVoteRequest {
    pub event_id: Uuid,
    pub band_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub ip_address: String,
    pub user_agent: String,
    pub vote_fingerprint: String,
    pub fingerprintjs_visitor_id: Option<String>,
    pub fingerprintjs_confidence: Option<f64>,
    pub status: VoteStatus,
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}
