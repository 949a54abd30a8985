//! Request metadata helpers
//!
//! Client address, user agent, cookies and campaign parameters read from
//! incoming HTTP requests.

use std::net::SocketAddr;
use axum::extract::ConnectInfo;
use axum::http::{header, Extensions, HeaderMap, HeaderValue, Uri};
use serde::{Deserialize, Serialize};
use tracing::warn;
use url::Url;

/// Placeholder used when the client does not send an address or user agent
pub const UNKNOWN: &str = "unknown";

/// Address of the TCP peer, present when the server runs with connect info
pub fn peer_addr(extensions: &Extensions) -> Option<SocketAddr> {
    extensions.get::<ConnectInfo<SocketAddr>>().map(|info| info.0)
}

/// Client IP used for vote fingerprints and rate limiting.
///
/// With `trust_proxy_headers` the first `X-Forwarded-For` hop wins, then
/// `X-Real-IP`. Otherwise those headers are ignored since any client can
/// set them. The TCP peer comes next, then [`UNKNOWN`].
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        if let Some(ip) = header("x-forwarded-for").or_else(|| header("x-real-ip")) {
            return ip;
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN.to_string())
}

pub fn user_agent(headers: &HeaderMap) -> String {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .unwrap_or(UNKNOWN)
        .to_string()
}

/// Read a cookie value from the `Cookie` request headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// Attributes of a response cookie
#[derive(Debug, Clone)]
pub struct CookieSpec<'a> {
    pub name: &'a str,
    pub value: &'a str,
    pub max_age_seconds: i64,
    pub http_only: bool,
    pub secure: bool,
}

impl CookieSpec<'_> {
    /// Render as a `Set-Cookie` header value
    pub fn to_header_value(&self) -> Option<HeaderValue> {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; SameSite=Lax",
            self.name, self.value, self.max_age_seconds
        );
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie).ok()
    }
}

/// Campaign attribution parsed from the request URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub utm_source: Option<String>,
    pub utm_medium: Option<String>,
    pub utm_campaign: Option<String>,
}

/// Extract UTM parameters from the request URL.
///
/// A URL that cannot be parsed yields the defaults and a warning.
pub fn extract_utm_params(headers: &HeaderMap, uri: &Uri) -> UtmParams {
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    let raw = if uri.scheme().is_some() {
        uri.to_string()
    } else {
        format!("http://{}{}", host, uri)
    };

    match Url::parse(&raw) {
        Ok(url) => {
            let mut params = UtmParams::default();
            for (key, value) in url.query_pairs() {
                let value = Some(value.into_owned()).filter(|v| !v.is_empty());
                match key.as_ref() {
                    "utm_source" => params.utm_source = value,
                    "utm_medium" => params.utm_medium = value,
                    "utm_campaign" => params.utm_campaign = value,
                    _ => {}
                }
            }
            params
        }
        Err(e) => {
            warn!(url = %raw, error = %e, "Could not parse request URL, skipping UTM extraction");
            UtmParams::default()
        }
    }
}
