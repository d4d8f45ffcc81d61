use crate::shared::icons::icon;
use leptos::prelude::*;

/// Collapsible container for the explorer filters.
///
/// Shows how many context dimensions are active and, while the live filters
/// still equal the applied insight context, the "viewing insight data" badge.
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active context filters (for the counter)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Whether the insight badge is shown
    #[prop(into)]
    insight_badge: Signal<bool>,

    /// Filter widgets
    children: ChildrenFn,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div class="filter-panel-header__left" on:click=toggle_expanded>
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">"Filtros"</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <Show when=move || insight_badge.get()>
                    <span class="badge badge--insight" title="Os filtros atuais correspondem ao insight selecionado">
                        "📊 Visualizando dados do insight"
                    </span>
                </Show>
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">{children()}</div>
            </div>
        </div>
    }
}

/// Removable chip for one active filter
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <span class="filter-tag">
            <span>{label}</span>
            <button
                type="button"
                class="filter-tag__remove"
                aria-label="Remover filtro"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </button>
        </span>
    }
}
