use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use crate::shared::format::{period_range_text, today_local};
use contracts::dashboards::d400_sales_metrics::PeriodSelector;
use leptos::ev::MouseEvent;
use leptos::prelude::*;

/// Period selector with the calendar window next to every option.
#[component]
pub fn PeriodDropdown() -> impl IntoView {
    let ctx = use_sales_dashboard();
    let today = today_local();

    let toggle = move |ev: MouseEvent| {
        ev.stop_propagation();
        if !ctx.layout_mode.get_untracked() {
            ctx.dropdown_open.update(|open| *open = !*open);
        }
    };

    let current_label = move || ctx.period.with(|p| p.label().to_string());
    let current_range = move || ctx.period.with(|p| period_range_text(p, today));

    let options = move || {
        let selected = ctx.period.get();
        let custom = PeriodSelector::Custom(ctx.custom_days.get());

        PeriodSelector::NAMED
            .iter()
            .cloned()
            .chain(std::iter::once(custom))
            .map(|option| {
                let class = if option.key() == selected.key() {
                    "period-option period-option--selected"
                } else {
                    "period-option"
                };
                let label = option.label().to_string();
                let range = period_range_text(&option, today);
                let on_pick = move |ev: MouseEvent| {
                    ev.stop_propagation();
                    if option.is_custom() {
                        ctx.select_custom_period();
                    } else {
                        ctx.select_period(option.clone());
                    }
                };

                view! {
                    <li>
                        <button type="button" class=class on:click=on_pick>
                            <span class="period-option__label">{label}</span>
                            <span class="period-option__range">{range}</span>
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    view! {
        <div class="period-dropdown" on:click=|ev: MouseEvent| ev.stop_propagation()>
            <button
                type="button"
                class="period-dropdown__trigger"
                aria-expanded=move || ctx.dropdown_open.get().to_string()
                on:click=toggle
            >
                <span class="period-dropdown__label">{current_label}</span>
                <span class="period-dropdown__range">{current_range}</span>
            </button>
            <Show when=move || ctx.dropdown_open.get()>
                <ul class="period-dropdown__menu" role="listbox">
                    {options}
                </ul>
            </Show>
        </div>
    }
}
