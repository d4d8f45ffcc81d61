//! API utilities for frontend-backend communication
//!
//! Every request goes through [`fetch_json`]: endpoint + query parameters,
//! with the tenant's `brand_id` added automatically.

use gloo_net::http::Request;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::config::TenantConfig;

/// Get the base URL for API requests
///
/// Constructs the analytics API base URL from the current window location,
/// using port 8000 for the backend server.
///
/// # Returns
/// - API base URL like "http://localhost:8000/api/v1/analytics"
/// - Empty string if window is not available
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:8000/api/v1/analytics", protocol, hostname)
}

/// Serialize query parameters; `None` fields are skipped by the types themselves
pub fn encode_params<P: Serialize>(params: &P) -> Result<String, String> {
    serde_qs::to_string(params).map_err(|e| format!("Failed to encode params: {}", e))
}

/// Join non-empty query fragments with `&`
pub fn join_query<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|part| !part.as_ref().is_empty())
        .map(|part| part.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("&")
}

/// Build a full API URL: base + endpoint, `brand_id` first, then the query
pub fn build_url(config: &TenantConfig, endpoint: &str, query: &str) -> String {
    let brand = config
        .brand_id
        .map(|id| format!("brand_id={}", id))
        .unwrap_or_default();
    let query = join_query([brand.as_str(), query]);

    if query.is_empty() {
        format!("{}{}", config.api_base, endpoint)
    } else {
        format!("{}{}?{}", config.api_base, endpoint, query)
    }
}

/// GET `endpoint` with an encoded query string and parse the JSON body
pub async fn fetch_json<T: DeserializeOwned>(
    config: &TenantConfig,
    endpoint: &str,
    query: &str,
) -> Result<T, String> {
    let url = build_url(config, endpoint, query);

    let response = Request::get(&url)
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "HTTP error: {} {}",
            response.status(),
            response.status_text()
        ));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Numbers the requests of one view so that only the latest response is rendered
#[derive(Debug, Default, Clone, Copy)]
pub struct RequestSeq {
    latest: u64,
}

impl RequestSeq {
    /// Start a request and return its number
    pub fn next(&mut self) -> u64 {
        self.latest += 1;
        self.latest
    }

    pub fn is_latest(&self, request: u64) -> bool {
        self.latest == request
    }
}
