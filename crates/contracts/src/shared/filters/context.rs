use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::date_range::DateRange;
use super::error::FilterError;

pub type StoreId = i64;
pub type ChannelId = i64;

/// Upper bound for `hour_end`: the one-hour window built for 23h ends at 24
pub const HOUR_END_MAX: u8 = 24;

/// Selected stores. Empty means "no store filter" (all stores).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreSelection(BTreeSet<StoreId>);

impl StoreSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: StoreId) -> bool {
        self.0.contains(&id)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Add the store if missing, remove it otherwise
    pub fn toggle(&mut self, id: StoreId) {
        if !self.0.remove(&id) {
            self.0.insert(id);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Ids in ascending order
    pub fn ids(&self) -> Vec<StoreId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<StoreId> for StoreSelection {
    fn from_iter<I: IntoIterator<Item = StoreId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[StoreId]> for StoreSelection {
    fn from(ids: &[StoreId]) -> Self {
        ids.iter().copied().collect()
    }
}

/// Non-date dimensions of a query. Every field is independent and optional.
///
/// `hour_start`/`hour_end` form a half-open window `[start, end)` and only
/// count when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextFilters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_start: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hour_end: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelId>,
}

impl ContextFilters {
    pub fn hour_range(&self) -> Option<(u8, u8)> {
        match (self.hour_start, self.hour_end) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    pub fn with_hour_range(mut self, range: Option<(u8, u8)>) -> Self {
        self.hour_start = range.map(|(start, _)| start);
        self.hour_end = range.map(|(_, end)| end);
        self
    }

    /// Same filters with a half-specified hour window dropped
    pub fn effective(&self) -> Self {
        Self {
            weekday: self.weekday,
            channel_id: self.channel_id,
            ..Self::default()
        }
        .with_hour_range(self.hour_range())
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of active dimensions (weekday, hour window, channel)
    pub fn active_count(&self) -> usize {
        [
            self.weekday.is_some(),
            self.hour_range().is_some(),
            self.channel_id.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Bounds-checked [`Self::effective`]: weekday 0..=6, hours 0..=23 / 0..=24
    pub fn validated(self) -> Result<Self, FilterError> {
        if let Some(weekday) = self.weekday {
            if weekday > 6 {
                return Err(FilterError::WeekdayOutOfRange(weekday));
            }
        }
        if let Some(start) = self.hour_start {
            if start > 23 {
                return Err(FilterError::HourOutOfRange(start));
            }
        }
        if let Some(end) = self.hour_end {
            if end > HOUR_END_MAX {
                return Err(FilterError::HourOutOfRange(end));
            }
        }
        Ok(self.effective())
    }
}

/// Ready-to-apply context. Absent fields mean "no constraint", never "nothing".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_ids: Option<Vec<StoreId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_filters: Option<ContextFilters>,
}

impl InsightContext {
    /// Store constraint, if any. An empty list constrains nothing.
    pub fn stores(&self) -> Option<StoreSelection> {
        self.store_ids
            .as_deref()
            .filter(|ids| !ids.is_empty())
            .map(StoreSelection::from)
    }

    /// Context filters, if any dimension is actually set
    pub fn filters(&self) -> Option<ContextFilters> {
        self.context_filters
            .map(|filters| filters.effective())
            .filter(|filters| !filters.is_empty())
    }
}

/// Live state of the three filter widgets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub date_range: DateRange,
    pub stores: StoreSelection,
    pub context_filters: ContextFilters,
}

impl FilterState {
    /// The live filters expressed as a context, for comparisons
    pub fn as_context(&self) -> InsightContext {
        InsightContext {
            date_range: Some(self.date_range),
            store_ids: (!self.stores.is_empty()).then(|| self.stores.ids()),
            context_filters: Some(self.context_filters),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_toggle() {
        let mut stores = StoreSelection::new();
        stores.toggle(3);
        stores.toggle(1);
        assert_eq!(stores.ids(), vec![1, 3]);
        stores.toggle(3);
        assert_eq!(stores.ids(), vec![1]);
    }

    #[test]
    fn test_partial_hour_range_is_absent() {
        let filters = ContextFilters {
            hour_start: Some(19),
            ..ContextFilters::default()
        };
        assert_eq!(filters.hour_range(), None);
        assert!(filters.is_empty());
        assert_eq!(filters.effective(), ContextFilters::default());
    }

    #[test]
    fn test_active_count() {
        let filters = ContextFilters {
            weekday: Some(4),
            hour_start: Some(19),
            hour_end: Some(20),
            channel_id: Some(2),
        };
        assert_eq!(filters.active_count(), 3);
    }

    #[test]
    fn test_validated_bounds() {
        let late = ContextFilters::default().with_hour_range(Some((23, 24)));
        assert_eq!(late.validated(), Ok(late));

        let bad_day = ContextFilters {
            weekday: Some(7),
            ..ContextFilters::default()
        };
        assert_eq!(bad_day.validated(), Err(FilterError::WeekdayOutOfRange(7)));

        let bad_hour = ContextFilters::default().with_hour_range(Some((24, 25)));
        assert_eq!(bad_hour.validated(), Err(FilterError::HourOutOfRange(24)));
    }

    #[test]
    fn test_empty_store_list_is_no_constraint() {
        let ctx = InsightContext {
            store_ids: Some(vec![]),
            ..InsightContext::default()
        };
        assert_eq!(ctx.stores(), None);
    }

    #[test]
    fn test_filters_serialize_without_nulls() {
        let filters = ContextFilters {
            weekday: Some(4),
            ..ContextFilters::default()
        };
        assert_eq!(serde_json::to_string(&filters).unwrap(), r#"{"weekday":4}"#);
    }
}
