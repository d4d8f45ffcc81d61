//! Tenant configuration threaded through every API call.
//!
//! The selected brand is an explicit value provided once at the app root,
//! not ambient mutable state.

use leptos::prelude::*;
use serde::Deserialize;

use super::api_utils::api_base;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantConfig {
    /// Base URL of the analytics API, e.g. "http://localhost:8000/api/v1/analytics"
    pub api_base: String,
    /// Brand whose stores and sales are queried; `None` queries every brand
    pub brand_id: Option<i64>,
}

impl TenantConfig {
    pub fn new(api_base: impl Into<String>, brand_id: Option<i64>) -> Self {
        Self {
            api_base: api_base.into(),
            brand_id,
        }
    }

    /// API on the current host, brand from the `brand_id` query parameter of the page URL
    pub fn from_location() -> Self {
        Self::new(api_base(), brand_from_location())
    }
}

fn brand_from_location() -> Option<i64> {
    let search = window().location().search().ok()?;
    brand_from_search(&search)
}

/// Tenant parameters read from the page URL
#[derive(Debug, Default, Deserialize)]
struct TenantParams {
    brand_id: Option<i64>,
}

/// Parse `brand_id` out of a `?a=1&brand_id=2` style string
pub fn brand_from_search(search: &str) -> Option<i64> {
    serde_qs::from_str::<TenantParams>(search.trim_start_matches('?'))
        .map_err(|e| log::warn!("Ignoring malformed tenant parameters: {}", e))
        .ok()
        .and_then(|params| params.brand_id)
}

/// Tenant configuration provided by the `App` root
pub fn use_tenant() -> TenantConfig {
    use_context::<TenantConfig>().unwrap_or_else(|| {
        log::warn!("TenantConfig not provided, falling back to current location");
        TenantConfig::from_location()
    })
}
