use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use contracts::dashboards::d400_sales_metrics::{compare_options, custom_option_label};
use leptos::ev::{Event, MouseEvent};
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlSelectElement;

/// Caption of the period the figures are compared with. Picking
/// "Custom period" asks for free text instead.
#[component]
pub fn CompareSelect(edit_key: String) -> impl IntoView {
    let ctx = use_sales_dashboard();

    let current = {
        let key = edit_key.clone();
        move || ctx.label_text(&key)
    };

    let options = {
        let current = current.clone();
        move || {
            let selected = current();
            compare_options(&selected)
                .into_iter()
                .map(|option| {
                    let is_selected = option == selected;
                    let value = option.clone();
                    view! {
                        <option value=value selected=is_selected>
                            {option}
                        </option>
                    }
                })
                .collect_view()
        }
    };

    let on_change = {
        let key = edit_key.clone();
        move |ev: Event| {
            let Some(select) = ev
                .target()
                .and_then(|t| t.dyn_into::<HtmlSelectElement>().ok())
            else {
                return;
            };
            let value = select.value();
            if value != custom_option_label() {
                ctx.commit_label(&key, &value);
                return;
            }
            if !ctx.prompt_compare_label(&key) {
                // cancelled: show the caption that is still stored
                select.set_value(&ctx.labels.with_untracked(|l| {
                    l.get(&key).unwrap_or_default().to_string()
                }));
            }
        }
    };

    view! {
        <label class="compare-select" on:click=|ev: MouseEvent| ev.stop_propagation()>
            <span class="compare-select__prefix">"vs."</span>
            <select
                class="compare-select__input"
                data-edit-key=edit_key
                prop:value=current
                disabled=move || ctx.layout_mode.get()
                on:change=on_change
            >
                {options}
            </select>
        </label>
    }
}
