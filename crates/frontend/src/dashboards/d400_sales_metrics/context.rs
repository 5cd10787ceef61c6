//! Reactive state of the sales metrics dashboard.
//!
//! Everything the operator can change lives here as a signal; every mutation
//! goes through a method that also persists the affected blob.

use crate::shared::storage::dashboard_store;
use contracts::dashboards::d400_sales_metrics::metrics::snapshot as metrics_snapshot;
use contracts::dashboards::d400_sales_metrics::{
    load_config, normalize, parse_compare_prompt, CustomDays, DashboardConfig, MetricsSnapshot,
    PeriodSelector, RawState, StateField, WidgetConfig, EMBEDDED_CONFIG,
};
use contracts::shared::layout::sizing::{percent_to_scale, scale_to_percent};
use contracts::shared::layout::{CanvasRect, LabelState, Position, PositionMap, SizeState, VisibilityMap};
use contracts::shared::shortcuts::{DoublePressDetector, KeyPress, ShortcutAction};
use gloo_net::http::Request;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, KeyboardEvent};

/// Optional layout override served next to `index.html`.
const CONFIG_URL: &str = "dashboard.toml";

#[derive(Clone, Copy)]
pub struct SalesDashboardContext {
    pub config: RwSignal<DashboardConfig>,
    /// Base figures as typed; normalized on commit.
    pub draft: RwSignal<RawState>,
    pub period: RwSignal<PeriodSelector>,
    pub custom_days: RwSignal<CustomDays>,
    pub labels: RwSignal<LabelState>,
    pub positions: RwSignal<PositionMap>,
    pub visibility: RwSignal<VisibilityMap>,
    pub sizes: RwSignal<SizeState>,
    pub admin_open: RwSignal<bool>,
    pub layout_mode: RwSignal<bool>,
    pub dropdown_open: RwSignal<bool>,
    /// Widget being dragged in layout mode.
    pub dragging: RwSignal<Option<String>>,
    /// Widget whose size the admin slider edits.
    pub size_target: RwSignal<Option<String>>,
    /// Rendered canvas width over the configured reference width.
    pub canvas_scale: RwSignal<f64>,
    pub snapshot: Memo<MetricsSnapshot>,
}

impl SalesDashboardContext {
    pub fn new() -> Self {
        let store = dashboard_store();
        let draft = RwSignal::new(store.load_state().unwrap_or_default());
        let period = RwSignal::new(store.load_period());
        let snapshot = Memo::new(move |_| {
            let base = draft.with(normalize);
            period.with(|p| metrics_snapshot(&base, p))
        });

        log::debug!(
            "Sales dashboard restored (period '{}')",
            period.with_untracked(|p| p.key().to_string())
        );

        Self {
            config: RwSignal::new(EMBEDDED_CONFIG.clone()),
            draft,
            period,
            custom_days: RwSignal::new(store.custom_days()),
            labels: RwSignal::new(store.load_labels()),
            positions: RwSignal::new(store.load_positions()),
            visibility: RwSignal::new(store.load_visibility()),
            sizes: RwSignal::new(store.load_sizes()),
            admin_open: RwSignal::new(false),
            layout_mode: RwSignal::new(false),
            dropdown_open: RwSignal::new(false),
            dragging: RwSignal::new(None),
            size_target: RwSignal::new(None),
            canvas_scale: RwSignal::new(1.0),
            snapshot,
        }
    }

    // ------------------------------------------------------------------------
    // Base figures

    /// Inputs are read-only while a projected period is shown.
    pub fn is_editable(&self) -> bool {
        !self.snapshot.with(|s| s.is_derived)
    }

    /// Text shown in the admin input for `field`: the draft on the baseline,
    /// the projected figure otherwise.
    pub fn field_text(&self, field: StateField) -> String {
        if self.is_editable() {
            self.draft.with(|d| d.text(field))
        } else {
            self.snapshot
                .with(|s| RawState::from(&s.metrics.base).text(field))
        }
    }

    pub fn edit_field(&self, field: StateField, text: String) {
        if self.snapshot.with_untracked(|s| s.is_derived) {
            return;
        }
        self.draft.update(|d| d.set_text(field, text));
        self.save_draft();
    }

    /// Replace the draft with its normalized form.
    pub fn commit_fields(&self) {
        if self.snapshot.with_untracked(|s| s.is_derived) {
            return;
        }
        self.draft.update(|d| *d = RawState::from(&normalize(d)));
        self.save_draft();
    }

    pub fn reset_values(&self) {
        self.draft.set(RawState::default());
        self.save_draft();
        log::info!("Base figures reset to defaults");
    }

    fn save_draft(&self) {
        self.draft.with_untracked(|d| dashboard_store().save_state(d));
    }

    // ------------------------------------------------------------------------
    // Period

    pub fn select_period(&self, period: PeriodSelector) {
        dashboard_store().save_period(&period);
        self.period.set(period);
        self.dropdown_open.set(false);
    }

    /// Ask for a custom day count; a cancelled or invalid answer keeps the
    /// current selection.
    pub fn select_custom_period(&self) {
        let current = self.custom_days.get_untracked();
        let answer = prompt("Number of days for the custom period:", &current.to_stored());

        match answer.as_deref().and_then(CustomDays::parse_prompt) {
            Some(days) => {
                dashboard_store().set_custom_days(days);
                self.custom_days.set(days);
                self.select_period(PeriodSelector::Custom(days));
            }
            None => {
                if let Some(text) = answer {
                    log::debug!("Ignoring custom period answer '{}'", text);
                }
                self.dropdown_open.set(false);
            }
        }
    }

    // ------------------------------------------------------------------------
    // Labels

    pub fn label_text(&self, key: &str) -> String {
        let fallback = self.default_label(key);
        self.labels.with(|l| l.text_or(key, &fallback))
    }

    /// Store the edited label and return the text to display.
    pub fn commit_label(&self, key: &str, text: &str) -> String {
        let fallback = self.default_label(key);
        let mut shown = String::new();
        self.labels.update(|l| shown = l.commit(key, text, &fallback));
        self.labels.with_untracked(|l| dashboard_store().save_labels(l));
        shown
    }

    pub fn reset_labels(&self) {
        let config = self.config.get_untracked();
        self.labels.update(|l| l.reset(config.label_defaults()));
        self.labels.with_untracked(|l| dashboard_store().save_labels(l));
    }

    /// Ask for a free-text comparison caption. Returns `false` when the
    /// answer was cancelled or blank and the caption is unchanged.
    pub fn prompt_compare_label(&self, key: &str) -> bool {
        let current = self
            .labels
            .with_untracked(|l| l.get(key).unwrap_or_default().to_string());
        match prompt("Custom comparison period:", &current)
            .as_deref()
            .and_then(parse_compare_prompt)
        {
            Some(text) => {
                self.commit_label(key, &text);
                true
            }
            None => false,
        }
    }

    fn default_label(&self, key: &str) -> String {
        self.config.with_untracked(|c| {
            c.widget(key)
                .map(|w| w.default_label().to_string())
                .unwrap_or_default()
        })
    }

    // ------------------------------------------------------------------------
    // Layout

    pub fn widget_position(&self, widget: &WidgetConfig) -> Position {
        self.positions
            .with(|p| p.resolve(&widget.key, widget.default_position()))
    }

    pub fn start_drag(&self, key: &str) {
        if self.layout_mode.get_untracked() {
            self.dragging.set(Some(key.to_string()));
        }
    }

    /// Follow the pointer while a widget is grabbed.
    pub fn drag_to(&self, client_x: f64, client_y: f64, canvas: &CanvasRect) {
        let Some(key) = self.dragging.get_untracked() else {
            return;
        };
        let position = Position::from_pointer(client_x, client_y, canvas);
        self.positions.update(|p| p.set(&key, position));
    }

    pub fn end_drag(&self) {
        if self.dragging.get_untracked().is_some() {
            self.dragging.set(None);
            self.positions
                .with_untracked(|p| dashboard_store().save_positions(p));
        }
    }

    pub fn reset_positions(&self) {
        self.positions.update(PositionMap::clear);
        self.positions
            .with_untracked(|p| dashboard_store().save_positions(p));
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visibility.with(|v| v.is_visible(key))
    }

    pub fn set_visible(&self, key: &str, visible: bool) {
        self.visibility.update(|v| v.set(key, visible));
        self.save_visibility();
    }

    pub fn set_all_visible(&self, visible: bool) {
        let config = self.config.get_untracked();
        self.visibility.update(|v| v.set_all(config.keys(), visible));
        self.save_visibility();
    }

    fn save_visibility(&self) {
        self.visibility
            .with_untracked(|v| dashboard_store().save_visibility(v));
    }

    /// Scale applied to a widget: canvas fit times global times per-widget.
    pub fn widget_scale(&self, key: &str) -> f64 {
        let canvas = self.canvas_scale.get();
        self.sizes
            .with(|s| canvas * s.global * s.item_scale(key))
    }

    pub fn global_percent(&self) -> u32 {
        self.sizes.with(|s| scale_to_percent(s.global))
    }

    pub fn item_percent(&self, key: &str) -> u32 {
        self.sizes.with(|s| scale_to_percent(s.item_scale(key)))
    }

    pub fn set_global_percent(&self, percent: u32) {
        self.sizes
            .update(|s| s.set_global(percent_to_scale(f64::from(percent))));
        self.save_sizes();
    }

    pub fn set_item_percent(&self, key: &str, percent: u32) {
        self.sizes
            .update(|s| s.set_item_scale(key, percent_to_scale(f64::from(percent))));
        self.save_sizes();
    }

    pub fn reset_item_size(&self, key: &str) {
        self.sizes.update(|s| s.reset_item(key));
        self.save_sizes();
    }

    pub fn reset_all_sizes(&self) {
        self.sizes.update(SizeState::reset_all);
        self.save_sizes();
    }

    fn save_sizes(&self) {
        self.sizes.with_untracked(|s| dashboard_store().save_sizes(s));
    }

    /// Recompute the canvas fit from its rendered width.
    pub fn update_canvas_scale(&self, rendered_width: f64) {
        let reference = self.config.with_untracked(|c| c.canvas.reference_width);
        if rendered_width > 0.0 && reference > 0.0 {
            self.canvas_scale.set(rendered_width / reference);
        }
    }

    // ------------------------------------------------------------------------
    // Modes

    pub fn toggle_admin(&self) {
        self.admin_open.update(|open| *open = !*open);
    }

    pub fn toggle_layout_mode(&self) {
        self.layout_mode.update(|on| *on = !*on);
        if !self.layout_mode.get_untracked() {
            self.end_drag();
        }
    }

    // ------------------------------------------------------------------------
    // Start-up

    /// Fetch the layout override and swap it in; the embedded layout stays
    /// when nothing usable is served.
    pub fn load_remote_config(&self) {
        let config = self.config;
        spawn_local(async move {
            let provided = match Request::get(CONFIG_URL).send().await {
                Ok(resp) if resp.ok() => resp.text().await.ok(),
                Ok(resp) => {
                    log::debug!("{} not served (HTTP {})", CONFIG_URL, resp.status());
                    None
                }
                Err(e) => {
                    log::debug!("{} not fetched: {}", CONFIG_URL, e);
                    None
                }
            };
            if provided.is_some() {
                config.set(load_config(provided.as_deref()));
            }
        });
    }

    /// Install the window-level keyboard handler: double `A` toggles the
    /// admin panel, double `F` layout mode, `Escape` closes the dropdown.
    pub fn install_shortcuts(&self) {
        let this = *self;
        let detector = StoredValue::new(DoublePressDetector::default());

        let closure = Closure::wrap(Box::new(move |event: web_sys::Event| {
            let Some(keyboard_event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            if keyboard_event.key() == "Escape" {
                this.dropdown_open.set(false);
                return;
            }

            let press = key_press(keyboard_event);
            let now = js_sys::Date::now();
            let mut action = None;
            detector.update_value(|d| action = d.on_key(&press, now));

            match action {
                Some(ShortcutAction::ToggleAdmin) => {
                    keyboard_event.prevent_default();
                    this.toggle_admin();
                }
                Some(ShortcutAction::ToggleLayoutMode) => {
                    keyboard_event.prevent_default();
                    this.toggle_layout_mode();
                }
                None => {}
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Close the period dropdown on any click that reaches the window.
    /// The dropdown stops propagation of its own clicks.
    pub fn install_outside_click(&self) {
        let dropdown_open = self.dropdown_open;
        let closure = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            if dropdown_open.get_untracked() {
                dropdown_open.set(false);
            }
        }) as Box<dyn FnMut(_)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

impl Default for SalesDashboardContext {
    fn default() -> Self {
        Self::new()
    }
}

/// `window.prompt`; `None` when cancelled or unavailable.
fn prompt(message: &str, default: &str) -> Option<String> {
    web_sys::window().and_then(|w| {
        w.prompt_with_message_and_default(message, default)
            .ok()
            .flatten()
    })
}

fn key_press(event: &KeyboardEvent) -> KeyPress {
    KeyPress {
        key: event.key(),
        code: event.code(),
        ctrl: event.ctrl_key(),
        meta: event.meta_key(),
        alt: event.alt_key(),
        shift: event.shift_key(),
        repeat: event.repeat(),
        in_editing_field: in_editing_field(event),
    }
}

fn in_editing_field(event: &KeyboardEvent) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<HtmlElement>().ok())
        .map(|el| {
            el.is_content_editable() || el.matches("input, textarea, select").unwrap_or(false)
        })
        .unwrap_or(false)
}

pub fn use_sales_dashboard() -> SalesDashboardContext {
    use_context::<SalesDashboardContext>().unwrap_or_else(|| {
        log::warn!("SalesDashboardContext not provided; creating a detached one");
        SalesDashboardContext::new()
    })
}
