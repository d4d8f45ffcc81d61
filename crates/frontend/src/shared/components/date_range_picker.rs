use chrono::Utc;
use contracts::shared::filters::catalog::QUICK_RANGES;
use contracts::shared::filters::DateRange;
use leptos::prelude::*;
use thaw::*;

/// Period filter: two date inputs, quick ranges and an "Aplicar" button.
///
/// Whenever `date_range` changes from outside (an insight context was
/// applied) the local inputs are resynchronised and `on_change` fires at
/// once, so the new period takes effect without an extra click. The parent
/// is responsible for ignoring that echo during a synchronization pass.
#[component]
pub fn DateRangePicker(
    /// Controlling period
    #[prop(into)]
    date_range: Signal<DateRange>,

    /// Called with every applied period
    on_change: Callback<DateRange>,

    /// Optional label above the inputs
    #[prop(optional)]
    label: Option<String>,
) -> impl IntoView {
    let local_start = RwSignal::new(date_range.get_untracked().start_str());
    let local_end = RwSignal::new(date_range.get_untracked().end_str());
    let (error, set_error) = signal(None::<String>);

    // auto-apply on prop change
    Effect::new(move |_| {
        let range = date_range.get();
        local_start.set(range.start_str());
        local_end.set(range.end_str());
        set_error.set(None);
        on_change.run(range);
    });

    let on_apply = move |_| {
        match DateRange::parse(&local_start.get_untracked(), &local_end.get_untracked()) {
            Ok(range) => {
                set_error.set(None);
                on_change.run(range);
            }
            Err(e) => {
                log::warn!("Date filter not applied: {}", e);
                set_error.set(Some(e.to_string()));
            }
        }
    };

    let apply_quick_range = move |days: u32| {
        let range = DateRange::last_days(Utc::now().date_naive(), days);
        local_start.set(range.start_str());
        local_end.set(range.end_str());
        set_error.set(None);
        on_change.run(range);
    };

    view! {
        <Flex vertical=true gap=FlexGap::Small class="date-filter">
            {label.map(|l| view! {
                <Label>{l}</Label>
            })}

            <ButtonGroup>
                {QUICK_RANGES
                    .iter()
                    .map(|(days, title)| {
                        let days = *days;
                        view! {
                            <Button
                                size=ButtonSize::Small
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| apply_quick_range(days)
                            >
                                {*title}
                            </Button>
                        }
                    })
                    .collect_view()}
            </ButtonGroup>

            <Flex class="date-filter__inputs" align=FlexAlign::Center gap=FlexGap::Small>
                <label class="date-filter__field">
                    <span>"Data Inicial"</span>
                    <input
                        type="date"
                        prop:value=move || local_start.get()
                        on:input=move |ev| local_start.set(event_target_value(&ev))
                    />
                </label>
                <div>"—"</div>
                <label class="date-filter__field">
                    <span>"Data Final"</span>
                    <input
                        type="date"
                        prop:value=move || local_end.get()
                        on:input=move |ev| local_end.set(event_target_value(&ev))
                    />
                </label>
            </Flex>

            {move || error.get().map(|e| view! {
                <div class="date-filter__error">{e}</div>
            })}

            <Button appearance=ButtonAppearance::Primary on_click=on_apply>
                "Aplicar Filtro"
            </Button>
        </Flex>
    }
}
