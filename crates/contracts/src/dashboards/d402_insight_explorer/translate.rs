//! Raw insight dimensions -> manual filter vocabulary.

use super::dto::RawInsightContext;
use crate::shared::filters::{weekday, ContextFilters, DateRange, InsightContext, Locale};

/// Only stores flagged, nothing else: the insight compares stores, so the
/// detail view keeps every store visible instead of narrowing to the flagged ones.
pub fn is_store_comparison(raw: &RawInsightContext) -> bool {
    !raw.stores().is_empty()
        && raw.days().is_empty()
        && raw.hours().is_empty()
        && raw.channels().is_empty()
}

/// First affected hour as a one-hour window `[h, h + 1)`; other hours are ignored
pub fn hour_window(raw: &RawInsightContext) -> Option<(u8, u8)> {
    raw.hours()
        .first()
        .copied()
        .filter(|hour| *hour <= 23)
        .map(|hour| (hour, hour + 1))
}

/// Translate an insight into a context ready for the filter widgets.
///
/// Dates are not derived from the insight: it was computed over `active_range`,
/// so that range is carried as-is.
pub fn translate(raw: &RawInsightContext, active_range: DateRange, locale: Locale) -> InsightContext {
    let weekday = raw
        .days()
        .first()
        .and_then(|name| weekday::name_to_code(name, locale));

    let context_filters = ContextFilters {
        weekday,
        channel_id: raw.channels().first().copied(),
        ..ContextFilters::default()
    }
    .with_hour_range(hour_window(raw));

    let store_ids = if is_store_comparison(raw) || raw.stores().is_empty() {
        None
    } else {
        Some(raw.stores().to_vec())
    };

    InsightContext {
        date_range: Some(active_range),
        store_ids,
        context_filters: Some(context_filters),
    }
}
