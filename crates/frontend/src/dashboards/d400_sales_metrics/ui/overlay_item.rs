use super::compare_select::CompareSelect;
use super::editable_label::EditableLabel;
use super::period_dropdown::PeriodDropdown;
use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use crate::shared::format::format_with_affix;
use contracts::dashboards::d400_sales_metrics::{WidgetConfig, WidgetKind};
use contracts::shared::layout::labels::EMPTY_LABEL;
use leptos::ev::{MouseEvent, PointerEvent};
use leptos::prelude::*;

/// One positioned widget on the canvas.
#[component]
pub fn OverlayItem(widget: WidgetConfig) -> impl IntoView {
    let ctx = use_sales_dashboard();
    let key = widget.key.clone();

    let style = {
        let widget = widget.clone();
        move || {
            let position = ctx.widget_position(&widget);
            let scale = ctx.widget_scale(&widget.key);
            format!(
                "left: {:.2}%; top: {:.2}%; --item-scale: {:.4};",
                position.x, position.y, scale
            )
        }
    };

    let kind_class = match widget.kind {
        WidgetKind::Metric => "overlay-item--metric",
        WidgetKind::Label => "overlay-item--label",
        WidgetKind::Period => "overlay-item--period",
        WidgetKind::PeriodCompare => "overlay-item--compare",
    };
    let class = {
        let key = key.clone();
        move || {
            let mut class = format!("overlay-item {}", kind_class);
            if !ctx.is_visible(&key) {
                class.push_str(" is-hidden");
            }
            if ctx.dragging.with(|d| d.as_deref() == Some(key.as_str())) {
                class.push_str(" is-dragging");
            }
            if ctx.admin_open.get() && ctx.size_target.with(|t| t.as_deref() == Some(key.as_str())) {
                class.push_str(" is-size-target");
            }
            class
        }
    };

    let on_pointer_down = {
        let key = key.clone();
        move |ev: PointerEvent| {
            if ctx.layout_mode.get_untracked() {
                ev.prevent_default();
                ctx.start_drag(&key);
            }
        }
    };

    // Clicking a widget while the admin panel is open targets it for resizing.
    let on_click = {
        let key = key.clone();
        move |_: MouseEvent| {
            if ctx.admin_open.get_untracked() {
                ctx.size_target.set(Some(key.clone()));
            }
        }
    };

    let body = match widget.kind {
        WidgetKind::Metric => view! { <MetricValue widget=widget.clone() /> }.into_any(),
        WidgetKind::Label => view! { <EditableLabel edit_key=key.clone() /> }.into_any(),
        WidgetKind::Period => view! { <PeriodDropdown /> }.into_any(),
        WidgetKind::PeriodCompare => view! { <CompareSelect edit_key=key.clone() /> }.into_any(),
    };

    view! {
        <div
            class=class
            style=style
            data-key=key
            on:pointerdown=on_pointer_down
            on:click=on_click
        >
            {body}
        </div>
    }
}

#[component]
fn MetricValue(widget: WidgetConfig) -> impl IntoView {
    let ctx = use_sales_dashboard();
    let format = widget.value_format();
    let affix = widget.affix();
    let metric = widget.metric;
    let title = widget.title().to_string();

    let text = move || match metric {
        Some(metric) => {
            let value = ctx.snapshot.with(|s| s.metrics.get(metric));
            format_with_affix(value, format, &affix)
        }
        None => EMPTY_LABEL.to_string(),
    };

    view! {
        <div class="metric">
            <span class="metric__title">{title}</span>
            <span class="metric__value">{text}</span>
        </div>
    }
}
