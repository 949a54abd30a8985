//! Photo model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Photo {
    pub id: Uuid,
    pub event_id: Option<Uuid>,
    pub band_id: Option<Uuid>,
    pub blob_url: String,
    pub original_filename: Option<String>,
    pub photographer: Option<String>,
    /// 64-bit perceptual hash as 16 hex characters
    pub phash: Option<String>,
    /// 64-bit difference hash as 16 hex characters
    pub dhash: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Filters for photo listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoFilter {
    pub event_id: Option<Uuid>,
    pub band_id: Option<Uuid>,
    pub photographer: Option<String>,
}
