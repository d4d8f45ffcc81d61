use serde::Serialize;

use super::context::{ChannelId, FilterState};
use super::normalize::store_key;

/// Query parameters sent to the analytics API, built fresh from widget state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsQuery {
    pub start_date: String,
    pub end_date: String,
    /// Comma-joined store ids, omitted when no store is selected
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_ids: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_start: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour_end: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
}

impl From<&FilterState> for AnalyticsQuery {
    fn from(state: &FilterState) -> Self {
        let filters = state.context_filters.effective();
        let store_ids = store_key(Some(state.stores.ids().as_slice()));
        Self {
            start_date: state.date_range.start_str(),
            end_date: state.date_range.end_str(),
            store_ids: (!store_ids.is_empty()).then_some(store_ids),
            weekday: filters.weekday,
            hour_start: filters.hour_start,
            hour_end: filters.hour_end,
            channel_id: filters.channel_id,
        }
    }
}
