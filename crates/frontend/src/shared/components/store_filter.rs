use contracts::dashboards::d402_insight_explorer::StoreInfo;
use contracts::shared::filters::StoreSelection;
use leptos::prelude::*;
use thaw::*;

use crate::shared::icons::icon;

/// Store multi-select. Every toggle applies immediately.
///
/// An incoming `selected` that differs from the local selection replaces it
/// and is applied right away (insight context); an equal one is ignored.
#[component]
pub fn StoreFilter(
    /// Controlling selection
    #[prop(into)]
    selected: Signal<StoreSelection>,

    /// Available stores, `None` while loading
    #[prop(into)]
    options: Signal<Option<Vec<StoreInfo>>>,

    /// Called with every new selection
    on_apply: Callback<StoreSelection>,

    /// "Limpar Filtros"
    on_clear: Callback<()>,
) -> impl IntoView {
    let local = RwSignal::new(selected.get_untracked());

    Effect::new(move |_| {
        let incoming = selected.get();
        if local.get_untracked() != incoming {
            local.set(incoming.clone());
            on_apply.run(incoming);
        }
    });

    let toggle = move |id| {
        local.update(|stores| stores.toggle(id));
        on_apply.run(local.get_untracked());
    };

    let store_count = move || options.with(|o| o.as_ref().map(Vec::len).unwrap_or(0));
    let all_selected = move || store_count() > 0 && local.with(StoreSelection::len) == store_count();

    let on_select_all = move |_| {
        let next = if all_selected() {
            StoreSelection::new()
        } else {
            options.with_untracked(|o| {
                o.as_deref()
                    .unwrap_or_default()
                    .iter()
                    .map(|store| store.id)
                    .collect()
            })
        };
        local.set(next.clone());
        on_apply.run(next);
    };

    let summary = move || {
        let count = local.with(StoreSelection::len);
        if all_selected() {
            "Todas as lojas selecionadas".to_string()
        } else if count == 1 {
            "1 loja selecionada".to_string()
        } else {
            format!("{} lojas selecionadas", count)
        }
    };

    view! {
        <div class="filter-card store-filter">
            <div class="filter-card__header">
                {icon("store")}
                <span class="filter-card__title">"Lojas"</span>
                <span class="filter-card__hint">
                    {move || format!("({} disponíveis)", store_count())}
                </span>
            </div>

            {move || match options.get() {
                None => view! {
                    <div class="filter-card__loading">
                        <Spinner size=SpinnerSize::Small />
                        <span>"Carregando lojas..."</span>
                    </div>
                }.into_any(),
                Some(stores) => view! {
                    <Flex vertical=true gap=FlexGap::Small>
                        <Button appearance=ButtonAppearance::Subtle on_click=on_select_all>
                            {move || if all_selected() { "Desmarcar Todas" } else { "Selecionar Todas" }}
                        </Button>

                        <div class="store-filter__list">
                            {stores
                                .into_iter()
                                .map(|store| {
                                    let id = store.id;
                                    let location = store.location();
                                    view! {
                                        <label class="store-filter__item">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || local.with(|s| s.contains(id))
                                                on:change=move |_| toggle(id)
                                            />
                                            <span class="store-filter__name">{store.name}</span>
                                            {location.map(|l| view! {
                                                <span class="store-filter__location">{l}</span>
                                            })}
                                        </label>
                                    }
                                })
                                .collect_view()}
                        </div>

                        <Show when=move || !local.with(StoreSelection::is_empty)>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| on_clear.run(())
                            >
                                "Limpar Filtros"
                            </Button>
                            <div class="filter-card__summary">{summary}</div>
                        </Show>
                    </Flex>
                }.into_any(),
            }}
        </div>
    }
}
