use contracts::dashboards::d402_insight_explorer::StoreInfo;
use contracts::shared::filters::{
    ContextFilters, DateRange, FilterState, InsightContext, StoreSelection,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::insights_panel::InsightsPanel;
use super::products_table::ProductsByContextTable;
use crate::dashboards::d402_insight_explorer::api;
use crate::shared::components::context_filter_panel::ContextFilterPanel;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::store_filter::StoreFilter;
use crate::shared::config::use_tenant;
use crate::shared::filter_sync::{FilterSync, FilterValue, FilterWidget};
use crate::shared::format::format_date;

/// Insight explorer: automatic insights on top, manual filters and the
/// filtered product ranking below, kept consistent by one [`FilterSync`].
#[component]
pub fn InsightExplorerDashboard() -> impl IntoView {
    let tenant = use_tenant();
    let sync = FilterSync::new(FilterState::default());
    let store_options = RwSignal::new(None::<Vec<StoreInfo>>);
    let is_expanded = RwSignal::new(true);

    // Load stores of the tenant on mount
    Effect::new(move |_| {
        let tenant = tenant.clone();
        spawn_local(async move {
            match api::get_stores(&tenant).await {
                Ok(response) => store_options.set(Some(response.stores)),
                Err(e) => {
                    log::error!("Failed to load stores: {}", e);
                    store_options.set(Some(Vec::new()));
                }
            }
        });
    });

    // Memos: downstream fetches run only when the value really changes
    let query = Memo::new(move |_| sync.query());
    let period = Memo::new(move |_| sync.date_range());
    let active_filters_count = Memo::new(move |_| sync.context_filters().active_count());
    let insight_badge = Signal::derive(move || sync.badge_visible());

    let on_navigate = Callback::new(move |ctx: InsightContext| {
        if sync.receive_context(&ctx) {
            is_expanded.set(true);
        }
    });
    let on_date_change =
        Callback::new(move |range: DateRange| sync.user_edit(FilterValue::DateRange(range)));
    let on_stores_apply =
        Callback::new(move |stores: StoreSelection| sync.user_edit(FilterValue::Stores(stores)));
    let on_stores_clear = Callback::new(move |_: ()| sync.clear(FilterWidget::Stores));
    let on_context_apply = Callback::new(move |filters: ContextFilters| {
        sync.user_edit(FilterValue::ContextFilters(filters))
    });
    let on_context_clear = Callback::new(move |_: ()| sync.clear(FilterWidget::ContextFilters));

    view! {
        <div id="d402_insight_explorer--dashboard" class="d402-dashboard">
            <header class="d402-header">
                <div>
                    <h1>"🍔 Restaurant Analytics"</h1>
                    <p class="d402-header__subtitle">"Explore os insights e continue com filtros manuais"</p>
                </div>
                <span class="d402-header__period">
                    {move || {
                        let range = period.get();
                        format!(
                            "{} até {} ({} dias)",
                            format_date(&range.start_str()),
                            format_date(&range.end_str()),
                            range.days()
                        )
                    }}
                </span>
            </header>

            <InsightsPanel date_range=period on_navigate=on_navigate />

            <FilterPanel
                is_expanded=is_expanded
                active_filters_count=active_filters_count
                insight_badge=insight_badge
            >
                <div class="d402-filters">
                    <DateRangePicker
                        date_range=sync.date_props
                        on_change=on_date_change
                        label="Período".to_string()
                    />
                    <StoreFilter
                        selected=sync.store_props
                        options=store_options
                        on_apply=on_stores_apply
                        on_clear=on_stores_clear
                    />
                    <ContextFilterPanel
                        filters=sync.context_props
                        on_apply=on_context_apply
                        on_clear=on_context_clear
                    />
                </div>
            </FilterPanel>

            <ProductsByContextTable query=query />
        </div>
    }
}
