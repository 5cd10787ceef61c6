use leptos::prelude::*;

/// Free-text field for numbers typed in the local format ("12,5").
///
/// The caller decides what the text means: `on_input` fires on every
/// keystroke with the raw text, `on_commit` when the field loses focus.
#[component]
pub fn NumberInput(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    disabled: Signal<bool>,
    /// "numeric" for counts, "decimal" for money and rates
    #[prop(default = "decimal")]
    input_mode: &'static str,
    #[prop(optional)]
    on_input: Option<Callback<String>>,
    #[prop(optional)]
    on_commit: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <label class="form__group">
            <span class="form__label">{label}</span>
            <input
                type="text"
                class="form__input"
                inputmode=input_mode
                autocomplete="off"
                prop:value=move || value.get()
                disabled=move || disabled.get()
                on:input=move |ev| {
                    if let Some(handler) = on_input {
                        handler.run(event_target_value(&ev));
                    }
                }
                on:blur=move |_| {
                    if let Some(handler) = on_commit {
                        handler.run(());
                    }
                }
            />
        </label>
    }
}
