use crate::dashboards::d400_sales_metrics::{SalesDashboardContext, SalesMetricsDashboard};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Dashboard state, restored from local storage.
    let dashboard = SalesDashboardContext::new();
    provide_context(dashboard);

    dashboard.install_shortcuts();
    dashboard.install_outside_click();
    dashboard.load_remote_config();

    view! {
        <SalesMetricsDashboard />
    }
}
