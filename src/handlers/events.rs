use axum::{
    extract::{rejection::JsonRejection, Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::models::UpdateEventStatusRequest;
use crate::router::AppState;
use crate::utils::errors::BandVoteError;

// Handler for GET /api/events
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, BandVoteError> {
    debug!("Fetching all events");
    let events = state.services.event_service.list_events().await?;
    Ok(Json(events))
}

// Handler for GET /api/events/:event_id
pub async fn get_event(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, BandVoteError> {
    let event = state.services.event_service.get_event(event_id).await?;
    Ok(Json(event))
}

// Handler for GET /api/events/:event_id/bands
pub async fn list_bands(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, BandVoteError> {
    let bands = state.services.event_service.list_bands(event_id).await?;
    Ok(Json(bands))
}

// Handler for GET /api/events/:event_id/results
pub async fn get_results(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
) -> Result<impl IntoResponse, BandVoteError> {
    let tally = state.services.event_service.results(event_id).await?;
    let total: i64 = tally.iter().map(|band| band.votes).sum();
    Ok(Json(json!({
        "eventId": event_id,
        "totalVotes": total,
        "bands": tally,
    })))
}

// Handler for PATCH /api/admin/events/:event_id/status
pub async fn update_event_status(
    State(state): State<AppState>,
    Path(event_id): Path<Uuid>,
    payload: Result<Json<UpdateEventStatusRequest>, JsonRejection>,
) -> Result<impl IntoResponse, BandVoteError> {
    let Json(request) = payload?;
    let event = state.services.event_service.set_status(event_id, request.status).await?;
    Ok(Json(event))
}
