use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use crate::shared::components::ui::{Button, Checkbox, NumberInput, RangeSlider};
use contracts::dashboards::d400_sales_metrics::StateField;
use contracts::shared::layout::sizing::{scale_to_percent, MAX_SCALE, MIN_SCALE};
use leptos::prelude::*;

/// Side panel for editing the base figures and customizing the canvas.
#[component]
pub fn AdminPanel() -> impl IntoView {
    let ctx = use_sales_dashboard();

    view! {
        <aside class="admin-panel">
            <div class="admin-panel__header">
                <h2 class="admin-panel__title">"Dashboard admin"</h2>
                <Button variant="ghost" title="Close (A A)" on_click=Callback::new(move |_| ctx.admin_open.set(false))>
                    "×"
                </Button>
            </div>

            <BaseFiguresSection />
            <VisibilitySection />
            <SizeSection />

            <section class="admin-panel__section">
                <h3 class="admin-panel__section-title">"Layout"</h3>
                <div class="admin-panel__actions">
                    <Button variant="secondary" on_click=Callback::new(move |_| ctx.toggle_layout_mode())>
                        {move || if ctx.layout_mode.get() { "Finish layout mode" } else { "Layout mode (F F)" }}
                    </Button>
                    <Button variant="secondary" on_click=Callback::new(move |_| ctx.reset_positions())>
                        "Reset positions"
                    </Button>
                    <Button variant="secondary" on_click=Callback::new(move |_| ctx.reset_labels())>
                        "Reset labels"
                    </Button>
                </div>
            </section>
        </aside>
    }
}

#[component]
fn BaseFiguresSection() -> impl IntoView {
    let ctx = use_sales_dashboard();
    let read_only = Signal::derive(move || !ctx.is_editable());

    let fields = StateField::ALL
        .into_iter()
        .map(|field| {
            view! {
                <NumberInput
                    label=field.label()
                    value=Signal::derive(move || ctx.field_text(field))
                    disabled=read_only
                    input_mode=if field.is_count() { "numeric" } else { "decimal" }
                    on_input=Callback::new(move |text: String| ctx.edit_field(field, text))
                    on_commit=Callback::new(move |_| ctx.commit_fields())
                />
            }
        })
        .collect_view();

    view! {
        <section class="admin-panel__section">
            <h3 class="admin-panel__section-title">"Base figures (last 30 days)"</h3>
            <Show when=move || read_only.get()>
                <p class="admin-panel__note">
                    {move || format!(
                        "Showing figures projected for \"{}\". Select \"Last 30 days\" to edit.",
                        ctx.period.with(|p| p.label().to_string())
                    )}
                </p>
            </Show>
            <div class="admin-panel__fields">{fields}</div>
            <div class="admin-panel__actions">
                <Button variant="secondary" on_click=Callback::new(move |_| ctx.reset_values())>
                    "Reset values"
                </Button>
            </div>
        </section>
    }
}

#[component]
fn VisibilitySection() -> impl IntoView {
    let ctx = use_sales_dashboard();

    let rows = move || {
        ctx.config
            .get()
            .widgets
            .into_iter()
            .map(|widget| {
                let key = widget.key.clone();
                let key_for_change = widget.key.clone();
                view! {
                    <Checkbox
                        id=format!("visibility-{}", widget.key)
                        label=widget.title().to_string()
                        checked=Signal::derive(move || ctx.is_visible(&key))
                        on_change=Callback::new(move |visible| ctx.set_visible(&key_for_change, visible))
                    />
                }
            })
            .collect_view()
    };

    let hidden = move || ctx.visibility.with(|v| v.hidden_count());

    view! {
        <section class="admin-panel__section">
            <h3 class="admin-panel__section-title">
                "Visible widgets"
                <Show when=move || { hidden() > 0 }>
                    <span class="admin-panel__badge">{move || format!("{} hidden", hidden())}</span>
                </Show>
            </h3>
            <div class="admin-panel__list">{rows}</div>
            <div class="admin-panel__actions">
                <Button variant="ghost" on_click=Callback::new(move |_| ctx.set_all_visible(true))>
                    "Show all"
                </Button>
                <Button variant="ghost" on_click=Callback::new(move |_| ctx.set_all_visible(false))>
                    "Hide all"
                </Button>
            </div>
        </section>
    }
}

#[component]
fn SizeSection() -> impl IntoView {
    let ctx = use_sales_dashboard();
    let min = scale_to_percent(MIN_SCALE);
    let max = scale_to_percent(MAX_SCALE);

    let target_options = move || {
        ctx.config
            .get()
            .widgets
            .into_iter()
            .map(|widget| {
                let title = widget.title().to_string();
                view! { <option value=widget.key>{title}</option> }
            })
            .collect_view()
    };

    let item_controls = move || {
        ctx.size_target.get().map(|key| {
            let key_for_value = key.clone();
            let key_for_change = key.clone();
            view! {
                <RangeSlider
                    label="Widget size"
                    value=Signal::derive(move || ctx.item_percent(&key_for_value))
                    min=min
                    max=max
                    step=5
                    unit="%"
                    on_change=Callback::new(move |percent| ctx.set_item_percent(&key_for_change, percent))
                />
                <Button variant="ghost" on_click=Callback::new(move |_| ctx.reset_item_size(&key))>
                    "Reset widget size"
                </Button>
            }
        })
    };

    view! {
        <section class="admin-panel__section">
            <h3 class="admin-panel__section-title">"Sizes"</h3>
            <RangeSlider
                label="All widgets"
                value=Signal::derive(move || ctx.global_percent())
                min=min
                max=max
                step=5
                unit="%"
                on_change=Callback::new(move |percent| ctx.set_global_percent(percent))
            />
            <label class="form__group">
                <span class="form__label">"Widget (or click one on the canvas)"</span>
                <select
                    class="form__select"
                    prop:value=move || ctx.size_target.get().unwrap_or_default()
                    on:change=move |ev| {
                        let key = event_target_value(&ev);
                        ctx.size_target.set((!key.is_empty()).then_some(key));
                    }
                >
                    <option value="">"None"</option>
                    {target_options}
                </select>
            </label>
            {item_controls}
            <div class="admin-panel__actions">
                <Button variant="secondary" on_click=Callback::new(move |_| ctx.reset_all_sizes())>
                    "Reset all sizes"
                </Button>
            </div>
        </section>
    }
}
