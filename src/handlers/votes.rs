use std::net::SocketAddr;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, OriginalUri, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use tracing::debug;

use crate::models::SubmitVoteRequest;
use crate::router::AppState;
use crate::services::{VoteDecision, VoteOutcome, VoteService, VoteSubmission};
use crate::utils::errors::BandVoteError;
use crate::utils::request::{client_ip, extract_utm_params, read_cookie, user_agent, CookieSpec};

const EMAIL_REQUIRED_MESSAGE: &str =
    "This device has already voted. Please provide your email address so we can verify your vote.";

// Handler for POST /api/votes
pub async fn submit_vote(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    payload: Result<Json<SubmitVoteRequest>, JsonRejection>,
) -> Result<Response, BandVoteError> {
    let Json(request) = payload?;
    let event_id = request.event_id;
    debug!(event_id = %event_id, band_id = %request.band_id, "Vote submission received");

    let submission = VoteSubmission {
        first_vote_cookie: read_cookie(&headers, &VoteService::first_vote_cookie_name(event_id)),
        ip_address: client_ip(
            &headers,
            connect_info.map(|ConnectInfo(addr)| addr),
            state.trust_proxy_headers,
        ),
        user_agent: user_agent(&headers),
        utm: extract_utm_params(&headers, &uri),
        submitted_at: Utc::now(),
        request,
    };

    let vote_service = &state.services.vote_service;
    let outcome = vote_service.submit(submission).await?;
    Ok(vote_response(vote_service, outcome))
}

fn vote_response(vote_service: &VoteService, outcome: VoteOutcome) -> Response {
    let VoteOutcome { vote, decision } = outcome;
    let status = decision.http_status();

    let body = match decision {
        VoteDecision::HeldForReview { has_email: false, .. } => json!({
            "success": false,
            "error": EMAIL_REQUIRED_MESSAGE,
            "voteId": vote.id,
            "status": vote.status,
            "duplicateDetected": true,
        }),
        VoteDecision::HeldForReview { has_email: true, .. } => json!({
            "success": true,
            "message": "Thanks! Your vote has been received and will be reviewed.",
            "voteId": vote.id,
            "status": vote.status,
            "duplicateDetected": true,
        }),
        VoteDecision::Approved | VoteDecision::Updated => json!({
            "success": true,
            "message": "Thanks for voting!",
            "voteId": vote.id,
            "status": vote.status,
            "duplicateDetected": false,
        }),
    };

    let mut response = (status, Json(body)).into_response();

    // Rejected submissions get no cookies so the retry with an email runs full detection
    if status.is_success() {
        let max_age = vote_service.cookie_max_age_seconds();
        let secure = vote_service.secure_cookies();
        let vote_id = vote.id.to_string();
        let band_id = vote.band_id.to_string();
        let first_vote_name = VoteService::first_vote_cookie_name(vote.event_id);
        let band_name = VoteService::band_cookie_name(vote.event_id);

        let cookies = [
            CookieSpec { name: &first_vote_name, value: &vote_id, max_age_seconds: max_age, http_only: true, secure },
            CookieSpec { name: &band_name, value: &band_id, max_age_seconds: max_age, http_only: false, secure },
        ];
        for cookie in cookies.iter().filter_map(CookieSpec::to_header_value) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }

    response
}
