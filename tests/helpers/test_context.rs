//! Test context for unified test setup
//!
//! Builds the real router over an in-memory store and offers small helpers
//! to send requests and read JSON responses.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::body::{to_bytes, Body};
use axum::http::{header, HeaderMap, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bandvote::config::Settings;
use bandvote::models::{Band, EventStatus};
use bandvote::router::{create_router, AppState};
use bandvote::services::ServiceFactory;

use super::memory_store::MemoryStore;
use crate::fixtures::{test_band, TestEvent};

pub const ADMIN_TOKEN: &str = "integration-admin-token";

/// Response captured from the router
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    /// All `Set-Cookie` header values
    pub fn cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(str::to_string)
            .collect()
    }

    /// The `Set-Cookie` value whose name is exactly `name`
    pub fn cookie(&self, name: &str) -> Option<String> {
        self.cookies()
            .into_iter()
            .find(|c| c.split_once('=').map(|(key, _)| key) == Some(name))
    }

    /// Value part of the named cookie
    pub fn cookie_value(&self, name: &str) -> Option<String> {
        self.cookie(name).and_then(|c| {
            c.split(';')
                .next()
                .and_then(|pair| pair.split_once('='))
                .map(|(_, value)| value.to_string())
        })
    }
}

/// Unified test context that owns the store and router
pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub settings: Settings,
    pub router: Router,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_settings(test_settings())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = Arc::new(MemoryStore::new());
        let services = ServiceFactory::new(&settings, store.clone(), store.clone(), store.clone());
        let router = create_router(AppState::new(&settings, services));

        Self { store, settings, router }
    }

    /// Seed an event with `band_count` bands in running order
    pub fn seed_event(&self, status: EventStatus, band_count: i32) -> (Uuid, Vec<Band>) {
        let event = TestEvent::new(status);
        self.store.insert_event(event.build());

        let bands: Vec<Band> = (1..=band_count).map(|order| test_band(event.id, order)).collect();
        for band in &bands {
            self.store.insert_band(band.clone());
        }
        (event.id, bands)
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, headers, body }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings with a valid admin token and a generous vote rate limit
pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.admin.api_token = ADMIN_TOKEN.to_string();
    settings.voting.secure_cookies = false;
    settings.rate_limit.votes_per_minute = 1000;
    settings.rate_limit.burst = 1000;
    settings
}

/// Client identity attached to a vote request
#[derive(Debug, Clone)]
pub struct Client {
    /// Peer address seen by the server
    pub ip: Option<String>,
    pub forwarded_for: Option<String>,
    pub user_agent: Option<String>,
    pub cookie: Option<String>,
}

impl Client {
    pub fn new(ip: &str, user_agent: &str) -> Self {
        Self {
            ip: Some(ip.to_string()),
            forwarded_for: None,
            user_agent: Some(user_agent.to_string()),
            cookie: None,
        }
    }

    /// A client with no peer address and no user agent
    pub fn anonymous() -> Self {
        Self { ip: None, forwarded_for: None, user_agent: None, cookie: None }
    }

    /// Send an `X-Forwarded-For` header
    pub fn with_forwarded_for(mut self, ip: impl Into<String>) -> Self {
        self.forwarded_for = Some(ip.into());
        self
    }

    pub fn with_cookie(mut self, cookie: impl Into<String>) -> Self {
        self.cookie = Some(cookie.into());
        self
    }
}

/// Build `POST {uri}` with a JSON vote body and the client's headers
pub fn vote_request(uri: &str, client: &Client, body: &Value) -> Request<Body> {
    raw_vote_request(uri, client, body.to_string())
}

/// Build `POST {uri}` with an arbitrary body, as sent by `client`
pub fn raw_vote_request(uri: &str, client: &Client, body: impl Into<String>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::HOST, "vote.example.com")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(ip) = &client.ip {
        let addr = SocketAddr::new(ip.parse().expect("client ip must parse"), 40000);
        builder = builder.extension(ConnectInfo(addr));
    }
    if let Some(forwarded_for) = &client.forwarded_for {
        builder = builder.header("x-forwarded-for", forwarded_for.as_str());
    }
    if let Some(user_agent) = &client.user_agent {
        builder = builder.header(header::USER_AGENT, user_agent.as_str());
    }
    if let Some(cookie) = &client.cookie {
        builder = builder.header(header::COOKIE, cookie.as_str());
    }

    builder.body(Body::from(body.into())).unwrap()
}
