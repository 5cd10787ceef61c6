use super::overlay_item::OverlayItem;
use crate::dashboards::d400_sales_metrics::context::use_sales_dashboard;
use contracts::shared::layout::CanvasRect;
use leptos::ev::PointerEvent;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// The dashboard surface. Widgets are absolutely positioned on top of it in
/// percent coordinates; in layout mode they can be dragged around.
#[component]
pub fn SalesCanvas() -> impl IntoView {
    let ctx = use_sales_dashboard();
    let canvas_ref = NodeRef::<html::Div>::new();

    let rect = move || {
        canvas_ref.get_untracked().map(|el| {
            let r = el.get_bounding_client_rect();
            CanvasRect {
                left: r.left(),
                top: r.top(),
                width: r.width(),
                height: r.height(),
            }
        })
    };

    let measure = move || {
        if let Some(r) = rect() {
            ctx.update_canvas_scale(r.width);
        }
    };

    // Measure once mounted, and again whenever the config changes the
    // reference width.
    Effect::new(move |_| {
        ctx.config.track();
        if canvas_ref.get().is_some() {
            measure();
        }
    });

    Effect::new(move |_| {
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            measure();
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    });

    let on_pointer_move = move |ev: PointerEvent| {
        if ctx.dragging.get_untracked().is_none() {
            return;
        }
        if let Some(r) = rect() {
            ev.prevent_default();
            ctx.drag_to(f64::from(ev.client_x()), f64::from(ev.client_y()), &r);
        }
    };

    let class = move || {
        if ctx.layout_mode.get() {
            "sales-canvas sales-canvas--layout"
        } else {
            "sales-canvas"
        }
    };

    view! {
        <div
            class=class
            node_ref=canvas_ref
            on:pointermove=on_pointer_move
            on:pointerup=move |_| ctx.end_drag()
            on:pointercancel=move |_| ctx.end_drag()
            on:pointerleave=move |_| ctx.end_drag()
        >
            {move || {
                ctx.config
                    .get()
                    .widgets
                    .into_iter()
                    .map(|widget| view! { <OverlayItem widget=widget /> })
                    .collect_view()
            }}
        </div>
    }
}
