//! Reactive wrapper around [`FilterSyncController`].
//!
//! The page owns one [`FilterSync`]. Widgets receive its `*_props` signals as
//! their controlling props and report changes through [`FilterSync::user_edit`].
//! The props are written only when a context is applied or a widget is cleared.

pub mod controller;

pub use controller::{
    badge_visible, EditOutcome, FilterSyncController, FilterValue, FilterWidget, ReceiveOutcome,
};

use contracts::shared::filters::{
    AnalyticsQuery, ContextFilters, DateRange, FilterState, InsightContext, StoreSelection,
};
use leptos::prelude::*;

#[derive(Clone, Copy)]
pub struct FilterSync {
    controller: StoredValue<FilterSyncController>,
    pub date_props: RwSignal<DateRange>,
    pub store_props: RwSignal<StoreSelection>,
    pub context_props: RwSignal<ContextFilters>,
    /// Bumped whenever the controller's live state may have changed
    revision: RwSignal<u64>,
}

impl FilterSync {
    pub fn new(initial: FilterState) -> Self {
        Self {
            date_props: RwSignal::new(initial.date_range),
            store_props: RwSignal::new(initial.stores.clone()),
            context_props: RwSignal::new(initial.context_filters),
            controller: StoredValue::new(FilterSyncController::new(initial)),
            revision: RwSignal::new(0),
        }
    }

    /// Apply an insight context. Returns `false` if it was a duplicate or empty.
    pub fn receive_context(&self, ctx: &InsightContext) -> bool {
        let outcome = self
            .controller
            .try_update_value(|controller| controller.receive_context(ctx));

        let Some(ReceiveOutcome::Applied(events)) = outcome else {
            return false;
        };

        for event in events {
            self.write_props(event);
        }
        self.bump();

        // widget effects run on the reactive flush; the pass ends after them
        let controller = self.controller;
        request_animation_frame(move || {
            controller.update_value(|controller| controller.end_pass());
        });
        true
    }

    pub fn user_edit(&self, value: FilterValue) {
        let outcome = self
            .controller
            .try_update_value(|controller| controller.notify_user_edit(value));
        match outcome {
            Some(EditOutcome::Accepted) => self.bump(),
            // widget goes back to the live value
            Some(EditOutcome::Rejected) => self.context_props.set(self.context_filters_untracked()),
            _ => {}
        }
    }

    pub fn clear(&self, widget: FilterWidget) {
        if let Some(value) = self
            .controller
            .try_update_value(|controller| controller.clear(widget))
        {
            self.write_props(value);
            self.bump();
        }
    }

    /// Recomputed on every read, never stored
    pub fn badge_visible(&self) -> bool {
        self.revision.track();
        self.controller
            .with_value(FilterSyncController::badge_visible)
    }

    /// Fresh query parameters from the live widget state
    pub fn query(&self) -> AnalyticsQuery {
        self.revision.track();
        self.controller.with_value(FilterSyncController::query)
    }

    pub fn date_range(&self) -> DateRange {
        self.revision.track();
        self.controller.with_value(|controller| controller.state().date_range)
    }

    pub fn context_filters(&self) -> ContextFilters {
        self.revision.track();
        self.context_filters_untracked()
    }

    fn context_filters_untracked(&self) -> ContextFilters {
        self.controller
            .with_value(|controller| controller.state().context_filters)
    }

    fn write_props(&self, value: FilterValue) {
        match value {
            FilterValue::DateRange(range) => self.date_props.set(range),
            FilterValue::Stores(stores) => self.store_props.set(stores),
            FilterValue::ContextFilters(filters) => self.context_props.set(filters),
        }
    }

    fn bump(&self) {
        self.revision.update(|revision| *revision += 1);
    }
}
