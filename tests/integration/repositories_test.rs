//! Repository tests against PostgreSQL
//!
//! Runs the real SQL: case-insensitive email lookup, the results tally,
//! optional photo filters and the approved-fingerprint unique index.

use assert_matches::assert_matches;
use axum::http::StatusCode;
use serial_test::serial;
use uuid::Uuid;

use bandvote::database::{EventRepository, EventStore, PhotoRepository, PhotoStore, VoteRepository, VoteStore};
use bandvote::models::{Band, CreateVoteRequest, EventStatus, Photo, PhotoFilter, VoteStatus};
use bandvote::services::compute_vote_fingerprint;
use bandvote::BandVoteError;

use crate::fixtures::{test_band, test_photo, TestEvent};
use crate::helpers::TestDatabase;

async fn seed_event(db: &TestDatabase, band_count: i32) -> (Uuid, Vec<Band>) {
    let event = TestEvent::voting();
    db.insert_event(&event.build()).await.unwrap();

    let bands: Vec<Band> = (1..=band_count).map(|order| test_band(event.id, order)).collect();
    for band in &bands {
        db.insert_band(band).await.unwrap();
    }
    (event.id, bands)
}

fn vote(event_id: Uuid, band_id: Uuid, device: &str, status: VoteStatus) -> CreateVoteRequest {
    CreateVoteRequest {
        event_id,
        band_id,
        name: None,
        email: None,
        ip_address: "203.0.113.9".to_string(),
        user_agent: device.to_string(),
        vote_fingerprint: compute_vote_fingerprint("203.0.113.9", device, &event_id.to_string(), "2024-04-01"),
        fingerprintjs_visitor_id: None,
        fingerprintjs_confidence: None,
        status,
        utm_source: None,
        utm_medium: None,
        utm_campaign: None,
    }
}

#[tokio::test]
#[serial]
async fn test_approved_email_lookup_ignores_case() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let votes = VoteRepository::new(db.pool.clone());
    let (event_id, bands) = seed_event(&db, 1).await;

    let approved = votes
        .create_vote(CreateVoteRequest {
            email: Some("Fan@Example.COM".to_string()),
            ..vote(event_id, bands[0].id, "Phone", VoteStatus::Approved)
        })
        .await
        .unwrap();
    votes
        .create_vote(CreateVoteRequest {
            email: Some("Waiting@Example.com".to_string()),
            ..vote(event_id, bands[0].id, "Laptop", VoteStatus::Pending)
        })
        .await
        .unwrap();

    let found = votes.find_approved_by_email(event_id, "fan@example.com").await.unwrap();
    assert_eq!(found.map(|v| v.id), Some(approved.id));

    assert!(votes.find_approved_by_email(event_id, "waiting@example.com").await.unwrap().is_none());
    assert!(votes.find_approved_by_email(Uuid::new_v4(), "fan@example.com").await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_tally_counts_approved_votes_and_keeps_silent_bands() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let events = EventRepository::new(db.pool.clone());
    let votes = VoteRepository::new(db.pool.clone());
    let (event_id, bands) = seed_event(&db, 3).await;

    for device in ["A", "B"] {
        votes.create_vote(vote(event_id, bands[2].id, device, VoteStatus::Approved)).await.unwrap();
    }
    votes.create_vote(vote(event_id, bands[0].id, "C", VoteStatus::Approved)).await.unwrap();
    for device in ["D", "E"] {
        votes.create_vote(vote(event_id, bands[0].id, device, VoteStatus::Pending)).await.unwrap();
    }

    let tally = events.vote_tally(event_id).await.unwrap();
    let rows: Vec<(Uuid, i64)> = tally.iter().map(|t| (t.band_id, t.votes)).collect();
    assert_eq!(rows, vec![(bands[2].id, 2), (bands[0].id, 1), (bands[1].id, 0)]);
    assert_eq!(tally[2].band_name, bands[1].name);
}

#[tokio::test]
#[serial]
async fn test_event_status_update_and_band_lookup() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let events = EventRepository::new(db.pool.clone());
    let (event_id, bands) = seed_event(&db, 2).await;
    let (other_event_id, _) = seed_event(&db, 1).await;

    let updated = events.update_event_status(event_id, EventStatus::Finalized).await.unwrap();
    assert_eq!(updated.map(|e| e.status()), Some(EventStatus::Finalized));
    assert!(events.update_event_status(Uuid::new_v4(), EventStatus::Voting).await.unwrap().is_none());

    let listed: Vec<Uuid> = events.list_bands(event_id).await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(listed, vec![bands[0].id, bands[1].id]);
    assert!(events.find_band(event_id, bands[1].id).await.unwrap().is_some());
    assert!(events.find_band(other_event_id, bands[1].id).await.unwrap().is_none());
}

#[tokio::test]
#[serial]
async fn test_photo_filters_are_optional() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let photos = PhotoRepository::new(db.pool.clone());
    let (event_id, bands) = seed_event(&db, 1).await;
    let (other_event_id, _) = seed_event(&db, 1).await;

    let newest = Photo {
        photographer: Some("Ada".to_string()),
        dhash: Some("0123456789abcdef".to_string()),
        ..test_photo(event_id, Some(bands[0].id), 1, Some("fedcba9876543210"))
    };
    let older = Photo { photographer: Some("Grace".to_string()), ..test_photo(event_id, None, 10, None) };
    let elsewhere = test_photo(other_event_id, None, 5, None);
    for photo in [&newest, &older, &elsewhere] {
        db.insert_photo(photo).await.unwrap();
    }

    let all = photos.list_photos(&PhotoFilter::default()).await.unwrap();
    let ids: Vec<Uuid> = all.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![newest.id, elsewhere.id, older.id]);
    assert_eq!(all[0].phash.as_deref(), Some("fedcba9876543210"));
    assert_eq!(all[0].dhash.as_deref(), Some("0123456789abcdef"));

    let by_event = photos
        .list_photos(&PhotoFilter { event_id: Some(event_id), ..PhotoFilter::default() })
        .await
        .unwrap();
    assert_eq!(by_event.len(), 2);

    let by_band = photos
        .list_photos(&PhotoFilter { band_id: Some(bands[0].id), ..PhotoFilter::default() })
        .await
        .unwrap();
    assert_eq!(by_band.iter().map(|p| p.id).collect::<Vec<_>>(), vec![newest.id]);

    let by_photographer = photos
        .list_photos(&PhotoFilter {
            event_id: Some(event_id),
            photographer: Some("Grace".to_string()),
            ..PhotoFilter::default()
        })
        .await
        .unwrap();
    assert_eq!(by_photographer.iter().map(|p| p.id).collect::<Vec<_>>(), vec![older.id]);
}

#[tokio::test]
#[serial]
async fn test_second_approved_vote_with_same_fingerprint_is_refused() {
    let db = TestDatabase::new().await.expect("Failed to create test database");
    let votes = VoteRepository::new(db.pool.clone());
    let (event_id, bands) = seed_event(&db, 1).await;

    let first = votes.create_vote(vote(event_id, bands[0].id, "Kiosk", VoteStatus::Approved)).await.unwrap();

    // Lost race: the duplicate check saw nothing, but the index holds
    let err = votes
        .create_vote(vote(event_id, bands[0].id, "Kiosk", VoteStatus::Approved))
        .await
        .unwrap_err();
    assert_matches!(err, BandVoteError::Database(_));
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.public_message(), "Internal server error");

    // Held-for-review rows may share the fingerprint
    let pending = votes.create_vote(vote(event_id, bands[0].id, "Kiosk", VoteStatus::Pending)).await.unwrap();
    assert_eq!(pending.status(), VoteStatus::Pending);

    let found = votes.find_by_fingerprint(event_id, &first.vote_fingerprint).await.unwrap();
    assert_eq!(found.map(|v| v.id), Some(first.id));
}
