//! Test fixtures for integration tests
//!
//! Builders for events, bands and photos with realistic fake data.

use chrono::{DateTime, Duration, Utc};
use fake::faker::company::en::CompanyName;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use bandvote::models::{Band, Event, EventStatus, Photo};

/// Builder for test events
#[derive(Debug, Clone)]
pub struct TestEvent {
    pub id: Uuid,
    pub name: String,
    pub status: EventStatus,
    pub date: DateTime<Utc>,
}

impl TestEvent {
    pub fn new(status: EventStatus) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: format!("Battle of the Tech Bands: {}", CompanyName().fake::<String>()),
            status,
            date: Utc::now() + Duration::days(7),
        }
    }

    pub fn voting() -> Self {
        Self::new(EventStatus::Voting)
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn build(&self) -> Event {
        let now = Utc::now();
        Event {
            id: self.id,
            name: self.name.clone(),
            date: self.date,
            location: Some("Community Hall".to_string()),
            status: self.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn test_band(event_id: Uuid, running_order: i32) -> Band {
    Band {
        id: Uuid::new_v4(),
        event_id,
        name: CompanyName().fake(),
        description: Some(Sentence(3..8).fake()),
        running_order,
        image_url: None,
        created_at: Utc::now(),
    }
}

/// Photo uploaded `minutes_ago` minutes before now
pub fn test_photo(event_id: Uuid, band_id: Option<Uuid>, minutes_ago: i64, phash: Option<&str>) -> Photo {
    let id = Uuid::new_v4();
    Photo {
        id,
        event_id: Some(event_id),
        band_id,
        blob_url: format!("https://photos.example.com/{}.jpg", id),
        original_filename: Some(format!("IMG_{}.jpg", minutes_ago)),
        photographer: Some(Name().fake()),
        phash: phash.map(str::to_string),
        dhash: None,
        uploaded_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

/// Photographer-attributed photo
pub fn test_photo_by(event_id: Uuid, photographer: &str, minutes_ago: i64) -> Photo {
    Photo {
        photographer: Some(photographer.to_string()),
        ..test_photo(event_id, None, minutes_ago, None)
    }
}
