use contracts::dashboards::d402_insight_explorer::{
    translate, Insight, InsightPriority, RawInsightContext,
};
use chrono::{DateTime, Utc};
use contracts::shared::filters::{DateRange, InsightContext, Locale};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d402_insight_explorer::api;
use crate::shared::api_utils::RequestSeq;
use crate::shared::config::use_tenant;
use crate::shared::format::{format_currency, format_date, format_percent, format_time_ago};
use crate::shared::icons::icon;

struct PriorityStyle {
    icon: &'static str,
    class: &'static str,
}

fn priority_style(priority: InsightPriority) -> PriorityStyle {
    match priority {
        InsightPriority::Critical => PriorityStyle {
            icon: "alert",
            class: "insight-card insight-card--critical",
        },
        InsightPriority::Attention => PriorityStyle {
            icon: "warning",
            class: "insight-card insight-card--attention",
        },
        InsightPriority::Positive => PriorityStyle {
            icon: "check",
            class: "insight-card insight-card--positive",
        },
    }
}

fn context_tags(context: &RawInsightContext) -> Vec<String> {
    let mut tags = Vec::new();
    if !context.days().is_empty() {
        tags.push(format!("📅 {}", context.days().join(", ")));
    }
    if !context.hours().is_empty() {
        let hours: Vec<String> = context.hours().iter().map(|h| format!("{}h", h)).collect();
        tags.push(format!("🕐 {}", hours.join(", ")));
    }
    if let Some(points) = context.data_points.filter(|p| *p > 0) {
        tags.push(format!("📊 {} pedidos", points));
    }
    tags
}

/// "Insights Automáticos" for the active period.
///
/// "Ver detalhes" translates the insight into filter vocabulary over the
/// active period and hands it to `on_navigate`.
#[component]
pub fn InsightsPanel(
    #[prop(into)] date_range: Signal<DateRange>,
    on_navigate: Callback<InsightContext>,
) -> impl IntoView {
    let tenant = use_tenant();
    let (insights, set_insights) = signal(Vec::<Insight>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let (last_update, set_last_update) = signal(None::<DateTime<Utc>>);
    let reload = RwSignal::new(0u32);
    let requests = StoredValue::new(RequestSeq::default());

    Effect::new(move |_| {
        let range = date_range.get();
        reload.track();
        let tenant = tenant.clone();
        let request = requests.try_update_value(RequestSeq::next).unwrap_or_default();
        set_loading.set(true);
        set_error.set(None);

        spawn_local(async move {
            let result = api::get_insights(&tenant, range).await;
            if !requests.try_with_value(|r| r.is_latest(request)).unwrap_or(false) {
                return;
            }
            match result {
                Ok(response) => {
                    log::debug!("Loaded {} insights", response.total);
                    set_insights.set(response.insights);
                    set_last_update.set(Some(Utc::now()));
                }
                Err(e) => {
                    log::error!("Failed to load insights: {}", e);
                    set_error.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    });

    let navigate = move |raw: &RawInsightContext| {
        let ctx = translate(raw, date_range.get_untracked(), Locale::PtBr);
        on_navigate.run(ctx);
    };

    view! {
        <div class="insights-panel">
            <div class="insights-panel__header">
                <h2>"🔍 Insights Automáticos"</h2>
                {move || last_update.get().map(|at| {
                    let age = format_time_ago((Utc::now() - at).num_seconds());
                    view! {
                        <span class="insights-panel__updated">{format!("Atualizado há {}", age)}</span>
                    }
                })}
                <Button
                    appearance=ButtonAppearance::Subtle
                    size=ButtonSize::Small
                    on_click=move |_| reload.update(|n| *n += 1)
                >
                    {icon("refresh")}
                </Button>
            </div>

            {move || {
                if loading.get() {
                    return view! {
                        <div class="insights-panel__loading">
                            <Spinner />
                            <span>"Analisando dados..."</span>
                        </div>
                    }.into_any();
                }
                if let Some(err) = error.get() {
                    return view! {
                        <div class="insights-panel__error">
                            <strong>"⚠ Erro: "</strong>
                            {err}
                        </div>
                    }.into_any();
                }

                let list = insights.get();
                if list.is_empty() {
                    return view! {
                        <div class="insights-panel__empty">
                            {icon("check")}
                            <p class="insights-panel__empty-title">"Tudo OK! 🎉"</p>
                            <p class="insights-panel__empty-hint">
                                "Nenhum alerta crítico detectado no momento"
                            </p>
                        </div>
                    }.into_any();
                }

                list.into_iter()
                    .map(|insight| view! { <InsightCard insight=insight on_details=navigate /> })
                    .collect_view()
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn InsightCard<F>(insight: Insight, on_details: F) -> impl IntoView
where
    F: Fn(&RawInsightContext) + Copy + Send + Sync + 'static,
{
    let style = priority_style(insight.priority);
    let period = if insight.impact.period == "monthly" { "mês" } else { "ano" };
    let tags = context_tags(&insight.context);
    let actionable = insight.context.is_actionable();
    let context = insight.context.clone();
    let confidence = format_percent(insight.confidence_score * 100.0);
    let detected = format_date(&insight.detected_at);

    view! {
        <div class=style.class>
            <div class="insight-card__icon">{icon(style.icon)}</div>
            <div class="insight-card__body">
                <h3 class="insight-card__title">{insight.title}</h3>
                <p class="insight-card__description">{insight.description}</p>

                <div class="insight-card__impact">
                    <span>"Impacto: "</span>
                    <strong>{format!("{}/{}", format_currency(insight.impact.value), period)}</strong>
                    {insight.recommendation.estimated_roi.map(|roi| view! {
                        <span class="insight-card__roi">
                            " · ROI estimado: " {format_currency(roi)}
                        </span>
                    })}
                </div>

                <div class="insight-card__recommendation">
                    "💡 " {insight.recommendation.action}
                </div>

                <div class="insight-card__meta">
                    {format!("Confiança: {} · Detectado em {}", confidence, detected)}
                </div>

                {(!tags.is_empty()).then(|| view! {
                    <div class="insight-card__tags">
                        {tags.into_iter()
                            .map(|tag| view! { <span class="insight-card__tag">{tag}</span> })
                            .collect_view()}
                    </div>
                })}

                {actionable.then(|| view! {
                    <Button
                        appearance=ButtonAppearance::Subtle
                        size=ButtonSize::Small
                        on_click=move |_| on_details(&context)
                    >
                        "Ver detalhes " {icon("arrow-right")}
                    </Button>
                })}
            </div>
        </div>
    }
}
