use leptos::prelude::*;

/// Button with a visual variant: "primary" (default), "secondary" or "ghost".
#[component]
pub fn Button(
    #[prop(optional, into)]
    variant: MaybeProp<String>,
    /// Additional CSS classes
    #[prop(optional, into)]
    class: MaybeProp<String>,
    #[prop(optional, into)]
    disabled: Option<Signal<bool>>,
    /// Tooltip text
    #[prop(optional, into)]
    title: MaybeProp<String>,
    #[prop(optional)]
    on_click: Option<Callback<leptos::ev::MouseEvent>>,
    children: Children,
) -> impl IntoView {
    let variant_class = move || match variant.get().as_deref().unwrap_or("primary") {
        "secondary" => "button--secondary",
        "ghost" => "button--ghost",
        _ => "button--primary",
    };
    let additional_class = move || class.get().unwrap_or_default();

    view! {
        <button
            type="button"
            class=move || format!("button {} {}", variant_class(), additional_class())
            title=move || title.get()
            disabled=move || disabled.map(|d| d.get()).unwrap_or(false)
            on:click=move |ev| {
                if let Some(handler) = on_click {
                    handler.run(ev);
                }
            }
        >
            {children()}
        </button>
    }
}
