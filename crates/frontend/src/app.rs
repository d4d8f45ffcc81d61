use crate::dashboards::InsightExplorerDashboard;
use crate::shared::config::TenantConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Tenant (API base + brand) for every request of the app
    let tenant = TenantConfig::from_location();
    log::info!("Analytics API: {} (brand: {:?})", tenant.api_base, tenant.brand_id);
    provide_context(tenant);

    view! {
        <InsightExplorerDashboard />
    }
}
