use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};

use crate::config::Settings;
use crate::handlers::{events, health, photos, votes};
use crate::middleware::{log_requests, require_admin, limit_votes, AuthMiddleware, RateLimitMiddleware};
use crate::services::ServiceFactory;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub services: ServiceFactory,
    pub rate_limiter: RateLimitMiddleware,
    pub auth: AuthMiddleware,
    /// Read client addresses from `X-Forwarded-For` / `X-Real-IP`
    pub trust_proxy_headers: bool,
}

impl AppState {
    pub fn new(settings: &Settings, services: ServiceFactory) -> Self {
        Self {
            services,
            rate_limiter: RateLimitMiddleware::from_settings(&settings.rate_limit),
            auth: AuthMiddleware::new(settings.admin.api_token.clone()),
            trust_proxy_headers: settings.server.trust_proxy_headers,
        }
    }
}

// Build the HTTP router
pub fn create_router(state: AppState) -> Router {
    let vote_routes = Router::new()
        .route("/api/votes", post(votes::submit_vote))
        .route_layer(from_fn_with_state(state.clone(), limit_votes));

    let admin_routes = Router::new()
        .route("/api/admin/events/:event_id/status", patch(events::update_event_status))
        .route_layer(from_fn_with_state(state.clone(), require_admin));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health))
        .route("/api/events", get(events::list_events))
        .route("/api/events/:event_id", get(events::get_event))
        .route("/api/events/:event_id/bands", get(events::list_bands))
        .route("/api/events/:event_id/results", get(events::get_results))
        .route("/api/photos", get(photos::list_photos))
        .route("/api/photos/seed", get(photos::share_seed))
        .route("/api/photos/duplicates", get(photos::near_duplicates))
        .merge(vote_routes)
        .merge(admin_routes)
        .layer(from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}
