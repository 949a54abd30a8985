//! Photo listing service

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use crate::config::PhotosConfig;
use crate::database::store::PhotoStore;
use crate::models::{Photo, PhotoFilter};
use crate::services::near_duplicate::{group_near_duplicates, DuplicateGroup};
use crate::services::shuffle::{resolve_seed, seeded_shuffle};
use crate::utils::errors::{BandVoteError, Result};
use crate::utils::helpers::{calculate_offset, generate_random_string, total_pages};

const SHARE_SEED_LENGTH: usize = 12;

/// Query parameters of `GET /api/photos`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PhotoQuery {
    pub event_id: Option<Uuid>,
    pub band_id: Option<Uuid>,
    pub photographer: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub seed: Option<String>,
    pub shuffle: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    pub pagination: Pagination,
    /// Seed the order was produced with; absent when not shuffled
    pub seed: Option<String>,
}

#[derive(Clone)]
pub struct PhotoService {
    photos: Arc<dyn PhotoStore>,
    config: PhotosConfig,
}

impl PhotoService {
    pub fn new(photos: Arc<dyn PhotoStore>, config: PhotosConfig) -> Self {
        Self { photos, config }
    }

    /// Filter, shuffle and paginate photos
    pub async fn list(&self, query: PhotoQuery) -> Result<PhotoPage> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(self.config.default_page_size)
            .clamp(1, self.config.max_page_size);

        let filter = PhotoFilter {
            event_id: query.event_id,
            band_id: query.band_id,
            photographer: query.photographer.filter(|p| !p.trim().is_empty()),
        };
        let photos = self.photos.list_photos(&filter).await?;

        let (ordered, seed) = if query.shuffle.unwrap_or(true) {
            let seed = resolve_seed(query.seed.as_deref());
            (seeded_shuffle(&photos, &seed), Some(seed))
        } else {
            (photos, None)
        };

        let total = ordered.len();
        let offset = calculate_offset(page as usize, limit as usize);
        let page_items: Vec<Photo> = ordered.into_iter().skip(offset).take(limit as usize).collect();

        debug!(total = total, page = page, limit = limit, seed = ?seed, "Photo page assembled");

        Ok(PhotoPage {
            photos: page_items,
            pagination: Pagination {
                page,
                limit,
                total,
                total_pages: total_pages(total, limit as usize),
            },
            seed,
        })
    }

    /// Fresh random seed for a shareable link
    pub fn share_seed(&self) -> String {
        generate_random_string(SHARE_SEED_LENGTH)
    }

    /// Near-duplicate groups among an event's photos
    pub async fn near_duplicates(&self, event_id: Option<Uuid>, threshold: Option<u32>) -> Result<Vec<DuplicateGroup>> {
        let threshold = threshold.unwrap_or(self.config.near_duplicate_threshold);
        if threshold > 64 {
            return Err(BandVoteError::InvalidInput("threshold must be between 0 and 64".to_string()));
        }

        let filter = PhotoFilter { event_id, ..PhotoFilter::default() };
        let photos = self.photos.list_photos(&filter).await?;
        Ok(group_near_duplicates(&photos, threshold))
    }
}
