use serde::{Deserialize, Serialize};

use crate::shared::filters::{ChannelId, StoreId};

/// Приоритет инсайта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightPriority {
    Critical,
    Attention,
    Positive,
}

/// Тип инсайта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    PerformanceIssue,
    Opportunity,
    ChurnRisk,
    RevenueAnomaly,
    SuccessPattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Estimated financial impact of an insight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightImpact {
    pub metric: String,
    pub value: f64,
    pub currency: String,
    /// "monthly" or "yearly"
    pub period: String,
}

/// Dimensions the detector flagged, as sent by the backend.
///
/// `affected_days` holds pt-BR weekday names ("quinta-feira").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawInsightContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_stores: Option<Vec<StoreId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_channels: Option<Vec<ChannelId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_days: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_hours: Option<Vec<u8>>,
    /// Shown on the card only, never turned into a filter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_products: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_points: Option<u64>,
}

impl RawInsightContext {
    pub fn stores(&self) -> &[StoreId] {
        self.affected_stores.as_deref().unwrap_or_default()
    }

    pub fn channels(&self) -> &[ChannelId] {
        self.affected_channels.as_deref().unwrap_or_default()
    }

    pub fn days(&self) -> &[String] {
        self.affected_days.as_deref().unwrap_or_default()
    }

    pub fn hours(&self) -> &[u8] {
        self.affected_hours.as_deref().unwrap_or_default()
    }

    /// True when at least one filterable dimension is present
    pub fn is_actionable(&self) -> bool {
        !(self.stores().is_empty()
            && self.channels().is_empty()
            && self.days().is_empty()
            && self.hours().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightRecommendation {
    pub action: String,
    #[serde(default)]
    pub estimated_roi: Option<f64>,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub link_to: Option<String>,
}

/// Automatically detected finding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub priority: InsightPriority,
    pub title: String,
    pub description: String,
    pub impact: InsightImpact,
    pub context: RawInsightContext,
    pub recommendation: InsightRecommendation,
    pub detected_at: String,
    pub confidence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightPeriod {
    pub start_date: String,
    pub end_date: String,
    pub days: i64,
}

/// Response of `GET /insights`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightsResponse {
    pub insights: Vec<Insight>,
    pub total: usize,
    pub generated_at: String,
    pub period: InsightPeriod,
}

/// Store as listed by `GET /stores/list`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreInfo {
    pub id: StoreId,
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub is_active: bool,
}

impl StoreInfo {
    /// "City, ST" or whichever part is known
    pub fn location(&self) -> Option<String> {
        match (self.city.as_deref(), self.state.as_deref()) {
            (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
            (Some(part), None) | (None, Some(part)) => Some(part.to_string()),
            (None, None) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreListResponse {
    pub stores: Vec<StoreInfo>,
}

/// Row of `GET /products/by-context`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductByContext {
    pub product_id: i64,
    pub product_name: String,
    pub category: Option<String>,
    pub times_sold: i64,
    pub total_revenue: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsByContextResponse {
    pub products: Vec<ProductByContext>,
}
