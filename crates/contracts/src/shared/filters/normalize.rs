//! Canonical key of a filter context.
//!
//! `normalize(a) == normalize(b)` iff both contexts filter the same data:
//! store order, duplicate ids, field order and half-specified hour windows do
//! not matter. This key is the only equality used for idempotence checks and
//! for the insight badge.

use serde::Serialize;

use super::context::{ContextFilters, InsightContext, StoreId};
use super::date_range::DateRange;

const STORE_DELIMITER: &str = ",";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NormalizedContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    date_range: Option<DateRange>,
    #[serde(skip_serializing_if = "String::is_empty")]
    store_ids: String,
    #[serde(skip_serializing_if = "ContextFilters::is_empty")]
    context_filters: ContextFilters,
}

/// Sorted, de-duplicated, comma-joined store ids; empty for no stores
pub fn store_key(store_ids: Option<&[StoreId]>) -> String {
    let mut ids = store_ids.map(<[StoreId]>::to_vec).unwrap_or_default();
    ids.sort_unstable();
    ids.dedup();
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(STORE_DELIMITER)
}

/// Canonical key. A context without any constraint normalizes to `""`.
pub fn normalize(ctx: &InsightContext) -> String {
    let normalized = NormalizedContext {
        date_range: ctx.date_range,
        store_ids: store_key(ctx.store_ids.as_deref()),
        context_filters: ctx.context_filters.unwrap_or_default().effective(),
    };

    if normalized.date_range.is_none()
        && normalized.store_ids.is_empty()
        && normalized.context_filters.is_empty()
    {
        return String::new();
    }

    // field order is fixed by the struct declaration
    serde_json::to_string(&normalized).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn may() -> DateRange {
        DateRange::parse("2025-05-01", "2025-05-31").unwrap()
    }

    #[test]
    fn test_store_order_does_not_matter() {
        let a = InsightContext {
            store_ids: Some(vec![3, 1, 2]),
            ..InsightContext::default()
        };
        let mut reversed = a.store_ids.clone().unwrap();
        reversed.reverse();
        let b = InsightContext {
            store_ids: Some(reversed),
            ..InsightContext::default()
        };
        assert_eq!(normalize(&a), normalize(&b));
        assert_eq!(normalize(&a), r#"{"storeIds":"1,2,3"}"#);
    }

    #[test]
    fn test_duplicate_store_ids_collapse() {
        assert_eq!(store_key(Some(&[2, 1, 2])), "1,2");
        assert_eq!(store_key(Some(&[])), "");
        assert_eq!(store_key(None), "");
    }

    #[test]
    fn test_empty_context_normalizes_to_empty() {
        assert_eq!(normalize(&InsightContext::default()), "");

        let only_blank_filters = InsightContext {
            store_ids: Some(vec![]),
            context_filters: Some(ContextFilters {
                hour_start: Some(10),
                ..ContextFilters::default()
            }),
            ..InsightContext::default()
        };
        assert_eq!(normalize(&only_blank_filters), "");
    }

    #[test]
    fn test_full_context_key() {
        let ctx = InsightContext {
            date_range: Some(may()),
            store_ids: Some(vec![5]),
            context_filters: Some(ContextFilters {
                weekday: Some(4),
                hour_start: Some(19),
                hour_end: Some(20),
                channel_id: Some(2),
            }),
        };
        assert_eq!(
            normalize(&ctx),
            concat!(
                r#"{"dateRange":{"startDate":"2025-05-01","endDate":"2025-05-31"},"#,
                r#""storeIds":"5","#,
                r#""contextFilters":{"weekday":4,"hourStart":19,"hourEnd":20,"channelId":2}}"#
            )
        );
    }

    #[test]
    fn test_absent_and_empty_filters_are_equal() {
        let absent = InsightContext {
            date_range: Some(may()),
            ..InsightContext::default()
        };
        let empty = InsightContext {
            date_range: Some(may()),
            store_ids: Some(vec![]),
            context_filters: Some(ContextFilters::default()),
        };
        assert_eq!(normalize(&absent), normalize(&empty));
    }

    #[test]
    fn test_different_channel_differs() {
        let a = InsightContext {
            context_filters: Some(ContextFilters {
                channel_id: Some(2),
                ..ContextFilters::default()
            }),
            ..InsightContext::default()
        };
        let b = InsightContext {
            context_filters: Some(ContextFilters {
                channel_id: Some(3),
                ..ContextFilters::default()
            }),
            ..InsightContext::default()
        };
        assert_ne!(normalize(&a), normalize(&b));
    }
}
