use leptos::prelude::*;

/// Integer slider with its current value shown next to the label.
#[component]
pub fn RangeSlider(
    #[prop(into)]
    label: String,
    #[prop(into)]
    value: Signal<u32>,
    min: u32,
    max: u32,
    #[prop(optional)]
    step: Option<u32>,
    /// Appended to the displayed value, e.g. "%"
    #[prop(default = "")]
    unit: &'static str,
    #[prop(optional)]
    on_change: Option<Callback<u32>>,
) -> impl IntoView {
    let step = step.unwrap_or(1);
    let shown = move || format!("{}{}", value.get(), unit);

    view! {
        <label class="form__group form__group--range">
            <span class="form__label">{label} " " <strong>{shown}</strong></span>
            <input
                type="range"
                class="form__range"
                min=min.to_string()
                max=max.to_string()
                step=step.to_string()
                prop:value=move || value.get().to_string()
                on:input=move |ev| {
                    if let Ok(parsed) = event_target_value(&ev).parse::<u32>() {
                        if let Some(handler) = on_change {
                            handler.run(parsed.clamp(min, max));
                        }
                    }
                }
            />
        </label>
    }
}
