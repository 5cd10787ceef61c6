use leptos::prelude::*;

/// Labelled checkbox. The checked state is owned by the caller.
#[component]
pub fn Checkbox(
    #[prop(into)]
    label: Signal<String>,
    #[prop(into)]
    checked: Signal<bool>,
    #[prop(optional)]
    on_change: Option<Callback<bool>>,
    /// Element id, also used by the label's `for`
    #[prop(into)]
    id: String,
) -> impl IntoView {
    let label_for = id.clone();

    view! {
        <div class="form__checkbox-wrapper">
            <input
                id=id
                type="checkbox"
                class="form__checkbox"
                prop:checked=move || checked.get()
                on:change=move |ev| {
                    if let Some(handler) = on_change {
                        handler.run(event_target_checked(&ev));
                    }
                }
            />
            <label class="form__checkbox-label" for=label_for>
                {label}
            </label>
        </div>
    }
}
