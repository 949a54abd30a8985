use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::router::AppState;
use crate::services::PhotoQuery;
use crate::utils::errors::BandVoteError;

#[derive(Debug, Deserialize)]
pub struct DuplicateQuery {
    pub event_id: Option<Uuid>,
    pub threshold: Option<u32>,
}

// Handler for GET /api/photos
pub async fn list_photos(
    State(state): State<AppState>,
    Query(query): Query<PhotoQuery>,
) -> Result<impl IntoResponse, BandVoteError> {
    let page = state.services.photo_service.list(query).await?;
    Ok(Json(page))
}

// Handler for GET /api/photos/seed
pub async fn share_seed(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({ "seed": state.services.photo_service.share_seed() }))
}

// Handler for GET /api/photos/duplicates
pub async fn near_duplicates(
    State(state): State<AppState>,
    Query(query): Query<DuplicateQuery>,
) -> Result<impl IntoResponse, BandVoteError> {
    let groups = state
        .services
        .photo_service
        .near_duplicates(query.event_id, query.threshold)
        .await?;
    Ok(Json(json!({ "groups": groups })))
}
