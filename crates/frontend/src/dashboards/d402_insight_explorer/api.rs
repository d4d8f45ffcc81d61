use contracts::dashboards::d402_insight_explorer::{
    InsightsResponse, ProductsByContextResponse, StoreListResponse,
};
use contracts::shared::filters::{AnalyticsQuery, DateRange};
use serde::Serialize;

use crate::shared::api_utils::{encode_params, fetch_json, join_query};
use crate::shared::config::TenantConfig;

#[derive(Serialize)]
struct PeriodParams {
    start_date: String,
    end_date: String,
}

/// Insights detected over the period
pub async fn get_insights(
    config: &TenantConfig,
    range: DateRange,
) -> Result<InsightsResponse, String> {
    let query = encode_params(&PeriodParams {
        start_date: range.start_str(),
        end_date: range.end_str(),
    })?;
    fetch_json(config, "/insights", &query).await
}

/// Stores of the tenant's brand
pub async fn get_stores(config: &TenantConfig) -> Result<StoreListResponse, String> {
    fetch_json(config, "/stores/list", "").await
}

/// Best-selling products under the current filters
pub async fn get_products_by_context(
    config: &TenantConfig,
    query: &AnalyticsQuery,
    limit: u32,
) -> Result<ProductsByContextResponse, String> {
    let query = join_query([encode_params(query)?, format!("limit={}", limit)]);
    fetch_json(config, "/products/by-context", &query).await
}
