//! Keeps the insight context and the manually edited filters consistent.
//!
//! The controller is plain data with no reactive types so that every rule
//! below is testable natively:
//!
//! * a context is applied once per distinct normalized key; re-receiving the
//!   same key, or an empty one, does nothing;
//! * applying a context opens a synchronization pass that lists the widgets
//!   it wrote to. Edits reported while the pass is open are the widgets
//!   echoing the synthesized value back (auto-apply on prop change) and are
//!   ignored, so they can neither trigger a second fetch nor overwrite a
//!   sibling widget;
//! * the badge is a pure comparison of the live state with the state right
//!   after the last application.

use contracts::shared::filters::{
    normalize, AnalyticsQuery, ContextFilters, DateRange, FilterState, InsightContext,
    StoreSelection,
};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterWidget {
    DateRange,
    Stores,
    ContextFilters,
}

/// A value carried to or from one widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    DateRange(DateRange),
    Stores(StoreSelection),
    ContextFilters(ContextFilters),
}

impl FilterValue {
    pub fn widget(&self) -> FilterWidget {
        match self {
            FilterValue::DateRange(_) => FilterWidget::DateRange,
            FilterValue::Stores(_) => FilterWidget::Stores,
            FilterValue::ContextFilters(_) => FilterWidget::ContextFilters,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReceiveOutcome {
    /// One synthesized apply per affected widget
    Applied(Vec<FilterValue>),
    /// Same normalized key as the last applied context
    Duplicate,
    /// The context constrains nothing
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted,
    /// Arrived during a synchronization pass
    Suppressed,
    /// Same value as the live state
    Unchanged,
    /// Out-of-range value, live state kept
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct SyncPass {
    pending: BTreeSet<FilterWidget>,
}

#[derive(Debug, Clone, Default)]
pub struct FilterSyncController {
    /// Empty until a context is applied, and again after a clear
    last_applied_key: String,
    /// Live state right after the last application
    applied: Option<FilterState>,
    state: FilterState,
    pass: Option<SyncPass>,
}

impl FilterSyncController {
    pub fn new(initial: FilterState) -> Self {
        Self {
            state: initial,
            ..Self::default()
        }
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn last_applied_key(&self) -> &str {
        &self.last_applied_key
    }

    pub fn is_propagating(&self) -> bool {
        self.pass.is_some()
    }

    pub fn receive_context(&mut self, ctx: &InsightContext) -> ReceiveOutcome {
        let key = normalize(ctx);
        if key.is_empty() {
            log::debug!("filter sync: empty context ignored");
            return ReceiveOutcome::Empty;
        }
        if key == self.last_applied_key {
            log::debug!("filter sync: context already applied");
            return ReceiveOutcome::Duplicate;
        }

        let mut events = Vec::with_capacity(3);
        if let Some(range) = ctx.date_range {
            self.state.date_range = range;
            events.push(FilterValue::DateRange(range));
        }
        if let Some(stores) = ctx.stores() {
            self.state.stores = stores.clone();
            events.push(FilterValue::Stores(stores));
        }
        // a blank filter set normalizes like an absent one and leaves the widget alone
        if let Some(filters) = ctx.filters() {
            self.state.context_filters = filters;
            events.push(FilterValue::ContextFilters(filters));
        }

        // a pass still open from an earlier context is superseded
        self.pass = Some(SyncPass {
            pending: events.iter().map(FilterValue::widget).collect(),
        });
        self.applied = Some(self.state.clone());
        log::debug!(
            "filter sync: applied context to {} widget(s): {}",
            events.len(),
            key
        );
        self.last_applied_key = key;

        ReceiveOutcome::Applied(events)
    }

    /// A widget reported a new value through its own change handler
    pub fn notify_user_edit(&mut self, value: FilterValue) -> EditOutcome {
        if let Some(pass) = self.pass.as_mut() {
            pass.pending.remove(&value.widget());
            if pass.pending.is_empty() {
                self.pass = None;
            }
            log::debug!("filter sync: {:?} edit suppressed during sync", value.widget());
            return EditOutcome::Suppressed;
        }

        let changed = match value {
            FilterValue::DateRange(range) => replace(&mut self.state.date_range, range),
            FilterValue::Stores(stores) => replace(&mut self.state.stores, stores),
            FilterValue::ContextFilters(filters) => match filters.validated() {
                Ok(filters) => replace(&mut self.state.context_filters, filters),
                Err(e) => {
                    log::warn!("filter sync: context filters rejected: {}", e);
                    return EditOutcome::Rejected;
                }
            },
        };

        if changed {
            EditOutcome::Accepted
        } else {
            EditOutcome::Unchanged
        }
    }

    /// Close the synchronization pass once the reactive flush is over
    pub fn end_pass(&mut self) {
        if let Some(pass) = self.pass.take() {
            if !pass.pending.is_empty() {
                log::debug!("filter sync: pass closed without echo from {:?}", pass.pending);
            }
        }
    }

    /// User-invoked clear: the widget goes back to its default and the next
    /// context is treated as new even if it equals the last one.
    pub fn clear(&mut self, widget: FilterWidget) -> FilterValue {
        self.pass = None;
        self.last_applied_key.clear();
        self.applied = None;

        match widget {
            FilterWidget::DateRange => {
                self.state.date_range = DateRange::default();
                FilterValue::DateRange(self.state.date_range)
            }
            FilterWidget::Stores => {
                self.state.stores.clear();
                FilterValue::Stores(StoreSelection::new())
            }
            FilterWidget::ContextFilters => {
                self.state.context_filters = ContextFilters::default();
                FilterValue::ContextFilters(ContextFilters::default())
            }
        }
    }

    /// Whether the live filters still equal the applied insight context
    pub fn badge_visible(&self) -> bool {
        badge_visible(self.applied.as_ref(), &self.state)
    }

    pub fn query(&self) -> AnalyticsQuery {
        AnalyticsQuery::from(&self.state)
    }
}

/// Badge rule: show only while the live state normalizes to the same key as
/// the state produced by the last applied context.
pub fn badge_visible(applied: Option<&FilterState>, live: &FilterState) -> bool {
    applied.is_some_and(|applied| normalize(&applied.as_context()) == normalize(&live.as_context()))
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::dashboards::d402_insight_explorer::{translate, RawInsightContext};
    use contracts::shared::filters::Locale;

    fn may() -> DateRange {
        DateRange::parse("2025-05-01", "2025-05-31").unwrap()
    }

    fn thursday_ifood() -> InsightContext {
        InsightContext {
            date_range: Some(may()),
            store_ids: None,
            context_filters: Some(ContextFilters {
                weekday: Some(4),
                hour_start: Some(19),
                hour_end: Some(20),
                channel_id: Some(2),
            }),
        }
    }

    fn controller() -> FilterSyncController {
        FilterSyncController::new(FilterState {
            date_range: may(),
            ..FilterState::default()
        })
    }

    fn applied_events(outcome: ReceiveOutcome) -> Vec<FilterValue> {
        match outcome {
            ReceiveOutcome::Applied(events) => events,
            other => panic!("expected Applied, got {:?}", other),
        }
    }

    #[test]
    fn test_receive_applies_once() {
        let mut sync = controller();
        let ctx = thursday_ifood();

        let events = applied_events(sync.receive_context(&ctx));
        assert_eq!(events.len(), 2);
        let state = sync.state().clone();
        sync.end_pass();

        assert_eq!(sync.receive_context(&ctx), ReceiveOutcome::Duplicate);
        assert_eq!(sync.state(), &state);
    }

    #[test]
    fn test_one_event_per_widget() {
        let mut sync = controller();
        let ctx = InsightContext {
            store_ids: Some(vec![2, 1]),
            ..thursday_ifood()
        };
        let widgets: Vec<_> = applied_events(sync.receive_context(&ctx))
            .iter()
            .map(FilterValue::widget)
            .collect();
        assert_eq!(
            widgets,
            vec![
                FilterWidget::DateRange,
                FilterWidget::Stores,
                FilterWidget::ContextFilters
            ]
        );
    }

    #[test]
    fn test_empty_context_is_noop() {
        let mut sync = controller();
        assert_eq!(
            sync.receive_context(&InsightContext::default()),
            ReceiveOutcome::Empty
        );
        assert_eq!(sync.last_applied_key(), "");
        assert!(!sync.is_propagating());
        assert!(!sync.badge_visible());
    }

    #[test]
    fn test_reordered_stores_are_duplicate() {
        let mut sync = controller();
        let ctx = InsightContext {
            store_ids: Some(vec![1, 2, 3]),
            ..thursday_ifood()
        };
        sync.receive_context(&ctx);
        sync.end_pass();

        let reordered = InsightContext {
            store_ids: Some(vec![3, 2, 1]),
            ..thursday_ifood()
        };
        assert_eq!(sync.receive_context(&reordered), ReceiveOutcome::Duplicate);
    }

    #[test]
    fn test_absent_fields_leave_widgets_untouched() {
        let mut sync = controller();
        sync.notify_user_edit(FilterValue::Stores(StoreSelection::from(&[9][..])));

        let only_filters = InsightContext {
            context_filters: Some(ContextFilters {
                channel_id: Some(3),
                ..ContextFilters::default()
            }),
            ..InsightContext::default()
        };
        let events = applied_events(sync.receive_context(&only_filters));
        assert_eq!(events.len(), 1);
        assert_eq!(sync.state().stores.ids(), vec![9]);
        assert_eq!(sync.state().date_range, may());
        assert_eq!(sync.state().context_filters.channel_id, Some(3));
    }

    #[test]
    fn test_blank_filters_equal_absent_filters() {
        let weekday_edit = ContextFilters {
            weekday: Some(5),
            ..ContextFilters::default()
        };
        let absent = InsightContext {
            date_range: Some(may()),
            ..InsightContext::default()
        };
        let blank = InsightContext {
            context_filters: Some(ContextFilters::default()),
            ..absent.clone()
        };
        assert_eq!(normalize(&absent), normalize(&blank));

        let run = |ctx: &InsightContext| {
            let mut sync = controller();
            sync.notify_user_edit(FilterValue::ContextFilters(weekday_edit));
            let events = applied_events(sync.receive_context(ctx));
            (events, sync.state().clone())
        };
        let (absent_events, absent_state) = run(&absent);
        let (blank_events, blank_state) = run(&blank);

        assert_eq!(absent_events, blank_events);
        assert_eq!(absent_state, blank_state);
        assert_eq!(blank_state.context_filters.weekday, Some(5));
    }

    #[test]
    fn test_store_comparison_keeps_manual_context_filters() {
        let raw = RawInsightContext {
            affected_stores: Some(vec![1, 2]),
            ..RawInsightContext::default()
        };
        let ctx = translate(&raw, may(), Locale::PtBr);

        let mut sync = controller();
        let channel = ContextFilters {
            channel_id: Some(3),
            ..ContextFilters::default()
        };
        sync.notify_user_edit(FilterValue::ContextFilters(channel));

        let widgets: Vec<_> = applied_events(sync.receive_context(&ctx))
            .iter()
            .map(FilterValue::widget)
            .collect();
        assert_eq!(widgets, vec![FilterWidget::DateRange]);
        assert_eq!(sync.state().context_filters, channel);
    }

    #[test]
    fn test_echo_during_pass_is_suppressed() {
        let mut sync = controller();
        sync.receive_context(&thursday_ifood());
        assert!(sync.is_propagating());

        // the date widget auto-applies its new props
        let outcome = sync.notify_user_edit(FilterValue::DateRange(may()));
        assert_eq!(outcome, EditOutcome::Suppressed);
        // context filters widget does not echo; pass stays open for it
        assert!(sync.is_propagating());

        // a stale value from a sibling arriving in the same pass cannot clobber state
        let stale = FilterValue::ContextFilters(ContextFilters::default());
        assert_eq!(sync.notify_user_edit(stale), EditOutcome::Suppressed);
        assert!(!sync.is_propagating());
        assert_eq!(sync.state().context_filters.weekday, Some(4));
    }

    #[test]
    fn test_out_of_range_filters_are_rejected() {
        let mut sync = controller();
        let valid = ContextFilters {
            weekday: Some(6),
            ..ContextFilters::default()
        };
        assert_eq!(
            sync.notify_user_edit(FilterValue::ContextFilters(valid)),
            EditOutcome::Accepted
        );

        let bad_day = ContextFilters {
            weekday: Some(7),
            ..ContextFilters::default()
        };
        assert_eq!(
            sync.notify_user_edit(FilterValue::ContextFilters(bad_day)),
            EditOutcome::Rejected
        );
        let bad_hour = ContextFilters::default().with_hour_range(Some((24, 25)));
        assert_eq!(
            sync.notify_user_edit(FilterValue::ContextFilters(bad_hour)),
            EditOutcome::Rejected
        );
        assert_eq!(sync.state().context_filters, valid);
    }

    #[test]
    fn test_edits_after_pass_are_accepted() {
        let mut sync = controller();
        sync.receive_context(&thursday_ifood());
        sync.end_pass();

        let filters = ContextFilters {
            weekday: Some(5),
            ..ContextFilters::default()
        };
        assert_eq!(
            sync.notify_user_edit(FilterValue::ContextFilters(filters)),
            EditOutcome::Accepted
        );
        assert_eq!(
            sync.notify_user_edit(FilterValue::ContextFilters(filters)),
            EditOutcome::Unchanged
        );
        // editing does not forget the applied context
        assert_eq!(sync.receive_context(&thursday_ifood()), ReceiveOutcome::Duplicate);
    }

    #[test]
    fn test_echo_order_does_not_matter() {
        let ctx = InsightContext {
            store_ids: Some(vec![4, 2]),
            ..thursday_ifood()
        };

        let run = |reverse: bool| {
            let mut sync = controller();
            let mut events = applied_events(sync.receive_context(&ctx));
            if reverse {
                events.reverse();
            }
            for event in events {
                sync.notify_user_edit(event);
            }
            (sync.state().clone(), sync.last_applied_key().to_string(), sync.is_propagating())
        };

        assert_eq!(run(false), run(true));
        assert!(!run(false).2);
    }

    #[test]
    fn test_later_context_wins_mid_pass() {
        let mut sync = controller();
        sync.receive_context(&thursday_ifood());

        let friday = InsightContext {
            context_filters: Some(ContextFilters {
                weekday: Some(5),
                ..ContextFilters::default()
            }),
            ..InsightContext::default()
        };
        applied_events(sync.receive_context(&friday));
        assert_eq!(sync.last_applied_key(), normalize(&friday));
        assert_eq!(sync.state().context_filters.weekday, Some(5));
        assert_eq!(sync.state().context_filters.channel_id, None);
    }

    #[test]
    fn test_badge_lifecycle() {
        let mut sync = controller();
        assert!(!sync.badge_visible());

        sync.receive_context(&thursday_ifood());
        sync.end_pass();
        assert!(sync.badge_visible());

        let mut changed = sync.state().context_filters;
        changed.channel_id = Some(3);
        sync.notify_user_edit(FilterValue::ContextFilters(changed));
        assert!(!sync.badge_visible());

        changed.channel_id = Some(2);
        sync.notify_user_edit(FilterValue::ContextFilters(changed));
        assert!(sync.badge_visible());
    }

    #[test]
    fn test_badge_hidden_by_date_change_and_restored() {
        let mut sync = controller();
        sync.receive_context(&thursday_ifood());
        sync.end_pass();

        let june = DateRange::parse("2025-06-01", "2025-06-30").unwrap();
        sync.notify_user_edit(FilterValue::DateRange(june));
        assert!(!sync.badge_visible());

        // same range again, reached through a different path (quick range, typing)
        sync.notify_user_edit(FilterValue::DateRange(may()));
        assert!(sync.badge_visible());
    }

    #[test]
    fn test_badge_for_store_comparison_insight() {
        let raw = RawInsightContext {
            affected_stores: Some(vec![1, 2]),
            ..RawInsightContext::default()
        };
        let ctx = translate(&raw, may(), Locale::PtBr);

        let mut sync = controller();
        applied_events(sync.receive_context(&ctx));
        sync.end_pass();
        assert!(sync.state().stores.is_empty());
        assert!(sync.badge_visible());

        sync.notify_user_edit(FilterValue::Stores(StoreSelection::from(&[1][..])));
        assert!(!sync.badge_visible());
    }

    #[test]
    fn test_clear_allows_reapply() {
        let mut sync = controller();
        let ctx = thursday_ifood();
        sync.receive_context(&ctx);
        sync.end_pass();

        let cleared = sync.clear(FilterWidget::ContextFilters);
        assert_eq!(cleared, FilterValue::ContextFilters(ContextFilters::default()));
        assert_eq!(sync.last_applied_key(), "");
        assert!(!sync.badge_visible());

        applied_events(sync.receive_context(&ctx));
        assert_eq!(sync.state().context_filters.weekday, Some(4));
    }

    #[test]
    fn test_query_reflects_live_state() {
        let mut sync = controller();
        sync.receive_context(&thursday_ifood());
        sync.end_pass();

        let query = sync.query();
        assert_eq!(query.start_date, "2025-05-01");
        assert_eq!(query.weekday, Some(4));
        assert_eq!(query.hour_start, Some(19));
        assert_eq!(query.hour_end, Some(20));
        assert_eq!(query.channel_id, Some(2));
        assert_eq!(query.store_ids, None);

        sync.notify_user_edit(FilterValue::Stores(StoreSelection::from(&[8, 5][..])));
        assert_eq!(sync.query().store_ids.as_deref(), Some("5,8"));
    }

    /// Page with a date widget that calls back synchronously on every prop
    /// change, and a parent that routes the callback into the controller.
    struct Page {
        sync: FilterSyncController,
        receive_calls: usize,
        fetches: usize,
        widget_props: DateRange,
    }

    impl Page {
        fn receive(&mut self, ctx: &InsightContext) {
            self.receive_calls += 1;
            if let ReceiveOutcome::Applied(events) = self.sync.receive_context(ctx) {
                self.fetches += 1;
                for event in events {
                    if let FilterValue::DateRange(range) = event {
                        self.set_date_props(range);
                    }
                }
            }
            self.sync.end_pass();
        }

        fn set_date_props(&mut self, range: DateRange) {
            self.widget_props = range;
            // auto-apply: fires on_change right away
            self.on_date_change(range);
        }

        fn on_date_change(&mut self, range: DateRange) {
            if self.sync.notify_user_edit(FilterValue::DateRange(range)) == EditOutcome::Accepted {
                self.fetches += 1;
            }
        }
    }

    #[test]
    fn test_auto_applying_widget_does_not_loop() {
        let mut page = Page {
            sync: controller(),
            receive_calls: 0,
            fetches: 0,
            widget_props: may(),
        };
        let june = DateRange::parse("2025-06-01", "2025-06-30").unwrap();
        let ctx = InsightContext {
            date_range: Some(june),
            ..thursday_ifood()
        };

        page.receive(&ctx);
        assert_eq!(page.receive_calls, 1);
        assert_eq!(page.fetches, 1);
        assert_eq!(page.widget_props, june);
        assert!(!page.sync.is_propagating());

        page.receive(&ctx);
        assert_eq!(page.fetches, 1);

        // the widget keeps auto-applying for real user edits
        page.on_date_change(may());
        assert_eq!(page.fetches, 2);
        assert!(!page.sync.badge_visible());
    }

    #[test]
    fn test_thursday_scenario_end_to_end() {
        let raw = RawInsightContext {
            affected_days: Some(vec!["quinta-feira".to_string()]),
            affected_hours: Some(vec![19]),
            affected_channels: Some(vec![2]),
            ..RawInsightContext::default()
        };
        let ctx = translate(&raw, may(), Locale::PtBr);
        assert_eq!(ctx, thursday_ifood());

        let mut sync = controller();
        applied_events(sync.receive_context(&ctx));
        sync.end_pass();
        assert!(sync.badge_visible());
        assert_eq!(sync.query().weekday, Some(4));
    }
}
