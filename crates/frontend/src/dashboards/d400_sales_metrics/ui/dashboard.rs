use super::admin_panel::AdminPanel;
use super::canvas::SalesCanvas;
use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use leptos::prelude::*;

#[component]
pub fn SalesMetricsDashboard() -> impl IntoView {
    let ctx = use_sales_dashboard();

    let class = move || {
        let mut class = String::from("sales-dashboard");
        if ctx.admin_open.get() {
            class.push_str(" is-admin-open");
        }
        if ctx.layout_mode.get() {
            class.push_str(" is-layout-mode");
        }
        class
    };

    view! {
        <div class=class>
            <main class="sales-dashboard__stage">
                <SalesCanvas />
            </main>
            <Show when=move || ctx.layout_mode.get()>
                <div class="layout-banner">
                    "Layout mode: drag widgets to move them. Press F twice to finish."
                </div>
            </Show>
            <Show when=move || ctx.admin_open.get()>
                <AdminPanel />
            </Show>
        </div>
    }
}
