use contracts::shared::filters::catalog::{
    channel_name, hour_label, hour_value, parse_hour_value, CHANNELS, HOUR_PRESETS,
};
use contracts::shared::filters::weekday::{self, Locale};
use contracts::shared::filters::ContextFilters;
use leptos::prelude::*;
use thaw::*;

use super::filter_panel::FilterTag;
use crate::shared::icons::icon;

#[derive(Clone, Copy)]
enum ContextField {
    Weekday,
    Hour,
    Channel,
}

/// "Filtros Contextuais": weekday, hour window and channel.
///
/// Local selects are edited freely and applied with "Aplicar". A new
/// `filters` value from outside replaces the local selection without
/// applying it (the parent already holds it).
#[component]
pub fn ContextFilterPanel(
    /// Controlling filters
    #[prop(into)]
    filters: Signal<ContextFilters>,

    on_apply: Callback<ContextFilters>,

    /// "Limpar"
    on_clear: Callback<()>,
) -> impl IntoView {
    let weekday_sel = RwSignal::new(None::<u8>);
    let hour_sel = RwSignal::new(None::<(u8, u8)>);
    let channel_sel = RwSignal::new(None::<i64>);

    Effect::new(move |_| {
        let incoming = filters.get();
        weekday_sel.set(incoming.weekday);
        hour_sel.set(incoming.hour_range());
        channel_sel.set(incoming.channel_id);
    });

    let current = move || {
        ContextFilters {
            weekday: weekday_sel.get_untracked(),
            channel_id: channel_sel.get_untracked(),
            ..ContextFilters::default()
        }
        .with_hour_range(hour_sel.get_untracked())
    };

    let has_filters =
        move || weekday_sel.get().is_some() || hour_sel.get().is_some() || channel_sel.get().is_some();

    // an insight window like 19h-20h is not a preset; keep it selectable
    let hour_options = move || {
        let mut options: Vec<(String, String)> = HOUR_PRESETS
            .iter()
            .map(|preset| (hour_value(preset.start, preset.end), preset.label.to_string()))
            .collect();
        if let Some((start, end)) = hour_sel.get() {
            let value = hour_value(start, end);
            if !options.iter().any(|(v, _)| *v == value) {
                options.push((value, hour_label(start, end)));
            }
        }
        options
    };

    let remove_and_apply = move |field: ContextField| {
        match field {
            ContextField::Weekday => weekday_sel.set(None),
            ContextField::Hour => hour_sel.set(None),
            ContextField::Channel => channel_sel.set(None),
        }
        on_apply.run(current());
    };

    view! {
        <div class="filter-card context-filters">
            <div class="filter-card__header">
                {icon("filter")}
                <span class="filter-card__title">"Filtros Contextuais"</span>
            </div>

            <Flex vertical=true gap=FlexGap::Small>
                <label class="form__label">
                    "Dia da Semana"
                    <select
                        class="form__select"
                        on:change=move |ev| {
                            weekday_sel.set(event_target_value(&ev).parse().ok());
                        }
                    >
                        <option value="" selected=move || weekday_sel.get().is_none()>
                            "Todos os dias"
                        </option>
                        {weekday::options(Locale::PtBr)
                            .into_iter()
                            .map(|(code, label)| view! {
                                <option
                                    value=code.to_string()
                                    selected=move || weekday_sel.get() == Some(code)
                                >
                                    {label}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>

                <label class="form__label">
                    "Período do Dia"
                    <select
                        class="form__select"
                        on:change=move |ev| {
                            hour_sel.set(parse_hour_value(&event_target_value(&ev)));
                        }
                    >
                        <option value="" selected=move || hour_sel.get().is_none()>
                            "Todos os horários"
                        </option>
                        <For
                            each=hour_options
                            key=|(value, _)| value.clone()
                            children=move |(value, label)| {
                                let selected_value = value.clone();
                                view! {
                                    <option
                                        value=value
                                        selected=move || {
                                            hour_sel.get().map(|(s, e)| hour_value(s, e))
                                                == Some(selected_value.clone())
                                        }
                                    >
                                        {label}
                                    </option>
                                }
                            }
                        />
                    </select>
                </label>

                <label class="form__label">
                    "Canal de Venda"
                    <select
                        class="form__select"
                        on:change=move |ev| {
                            channel_sel.set(event_target_value(&ev).parse().ok());
                        }
                    >
                        <option value="" selected=move || channel_sel.get().is_none()>
                            "Todos os canais"
                        </option>
                        {CHANNELS
                            .iter()
                            .map(|(id, name)| {
                                let id = *id;
                                view! {
                                    <option
                                        value=id.to_string()
                                        selected=move || channel_sel.get() == Some(id)
                                    >
                                        {*name}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>

                <Flex gap=FlexGap::Small>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| on_apply.run(current())
                    >
                        "Aplicar"
                    </Button>
                    <Show when=has_filters>
                        <Button
                            appearance=ButtonAppearance::Secondary
                            on_click=move |_| on_clear.run(())
                        >
                            "Limpar"
                        </Button>
                    </Show>
                </Flex>

                <Show when=has_filters>
                    <div class="filter-card__active">
                        <p class="filter-card__hint">"Filtros ativos:"</p>
                        {move || weekday_sel.get()
                            .and_then(|code| weekday::code_to_label(code, Locale::PtBr))
                            .map(|label| view! {
                                <FilterTag
                                    label=label
                                    on_remove=Callback::new(move |_: ()| remove_and_apply(ContextField::Weekday))
                                />
                            })}
                        {move || hour_sel.get().map(|(start, end)| view! {
                            <FilterTag
                                label=hour_label(start, end)
                                on_remove=Callback::new(move |_: ()| remove_and_apply(ContextField::Hour))
                            />
                        })}
                        {move || channel_sel.get().map(|id| view! {
                            <FilterTag
                                label=channel_name(id)
                                    .map(str::to_string)
                                    .unwrap_or_else(|| format!("Canal {}", id))
                                on_remove=Callback::new(move |_: ()| remove_and_apply(ContextField::Channel))
                            />
                        })}
                    </div>
                </Show>
            </Flex>
        </div>
    }
}
