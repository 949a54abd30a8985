//! Event model

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Typed status; unknown values read as `Upcoming`
    pub fn status(&self) -> EventStatus {
        self.status.parse().unwrap_or(EventStatus::Upcoming)
    }

    pub fn is_voting_open(&self) -> bool {
        self.status() == EventStatus::Voting
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Upcoming,
    Voting,
    Finalized,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Upcoming => "upcoming",
            EventStatus::Voting => "voting",
            EventStatus::Finalized => "finalized",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(EventStatus::Upcoming),
            "voting" => Ok(EventStatus::Voting),
            "finalized" => Ok(EventStatus::Finalized),
            other => Err(format!("unknown event status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateEventStatusRequest {
    pub status: EventStatus,
}

/// Approved vote count for one band
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BandTally {
    pub band_id: Uuid,
    pub band_name: String,
    pub running_order: i32,
    pub votes: i64,
}
