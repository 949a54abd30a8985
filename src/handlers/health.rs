use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::router::AppState;
use crate::utils::errors::BandVoteError;

// Handler for GET /health
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, BandVoteError> {
    if let Err(e) = state.services.event_service.health_check().await {
        error!(error = %e, "Health check failed");
        return Err(BandVoteError::ServiceUnavailable("Database unreachable".to_string()));
    }

    Ok(Json(json!({ "status": "ok", "database": "up", "version": crate::VERSION })))
}
