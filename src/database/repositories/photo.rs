//! Photo repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::database::store::PhotoStore;
use crate::models::{Photo, PhotoFilter};
use crate::utils::errors::BandVoteError;

#[derive(Debug, Clone)]
pub struct PhotoRepository {
    pool: PgPool,
}

impl PhotoRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PhotoStore for PhotoRepository {
    async fn list_photos(&self, filter: &PhotoFilter) -> Result<Vec<Photo>, BandVoteError> {
        let photos = sqlx::query_as::<_, Photo>(
            r#"
            SELECT id, event_id, band_id, blob_url, original_filename, photographer, phash, dhash, uploaded_at
            FROM photos
            WHERE ($1::uuid IS NULL OR event_id = $1)
              AND ($2::uuid IS NULL OR band_id = $2)
              AND ($3::text IS NULL OR photographer = $3)
            ORDER BY uploaded_at DESC, id ASC
            "#
        )
        .bind(filter.event_id)
        .bind(filter.band_id)
        .bind(filter.photographer.as_deref())
        .fetch_all(&self.pool)
        .await?;

        Ok(photos)
    }
}
