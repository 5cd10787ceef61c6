use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use leptos::ev::{ClipboardEvent, FocusEvent, KeyboardEvent};
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlDocument, HtmlElement};

/// Inline-editable text. Enter commits, blank text restores the default.
///
/// The element's text is written by an effect rather than a reactive child:
/// the browser edits the DOM of a contenteditable directly, so a text node
/// owned by the view could be replaced while typing and stop receiving
/// updates.
#[component]
pub fn EditableLabel(edit_key: String) -> impl IntoView {
    let ctx = use_sales_dashboard();
    let label_ref = NodeRef::<html::Span>::new();

    {
        let key = edit_key.clone();
        Effect::new(move |_| {
            let text = ctx.label_text(&key);
            if let Some(el) = label_ref.get() {
                el.set_text_content(Some(&text));
            }
        });
    }

    let on_key_down = move |ev: KeyboardEvent| {
        if ev.key() == "Enter" {
            ev.prevent_default();
            if let Some(el) = target_element(ev.target()) {
                let _ = el.blur();
            }
        }
    };

    // Paste as plain text so no markup ends up in the label.
    let on_paste = move |ev: ClipboardEvent| {
        ev.prevent_default();
        let text = ev
            .clipboard_data()
            .and_then(|data| data.get_data("text/plain").ok())
            .unwrap_or_default();
        if text.is_empty() {
            return;
        }
        let document = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.dyn_into::<HtmlDocument>().ok());
        if let Some(document) = document {
            let _ = document.exec_command_with_show_ui_and_value("insertText", false, &text);
        }
    };

    let on_focus = move |ev: FocusEvent| {
        let Some(el) = target_element(ev.target()) else {
            return;
        };
        select_contents(&el);
    };

    let on_blur = {
        let key = edit_key.clone();
        move |ev: FocusEvent| {
            let Some(el) = target_element(ev.target()) else {
                return;
            };
            let typed = el.text_content().unwrap_or_default();
            ctx.commit_label(&key, &typed);
        }
    };

    view! {
        <span
            node_ref=label_ref
            class="editable-label"
            data-edit-key=edit_key
            contenteditable=move || if ctx.layout_mode.get() { "false" } else { "true" }
            spellcheck="false"
            on:keydown=on_key_down
            on:paste=on_paste
            on:focus=on_focus
            on:blur=on_blur
        ></span>
    }
}

fn target_element(target: Option<web_sys::EventTarget>) -> Option<HtmlElement> {
    target.and_then(|t| t.dyn_into::<HtmlElement>().ok())
}

/// Select the whole text so typing replaces it.
fn select_contents(el: &HtmlElement) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Ok(range) = document.create_range() else {
        return;
    };
    if range.select_node_contents(el).is_err() {
        return;
    }
    if let Ok(Some(selection)) = window.get_selection() {
        let _ = selection.remove_all_ranges();
        let _ = selection.add_range(&range);
    }
}
