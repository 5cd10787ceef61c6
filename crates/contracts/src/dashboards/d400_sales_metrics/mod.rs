pub mod compare;
pub mod config;
pub mod metrics;
pub mod period;
pub mod state;
pub mod store;

pub use compare::{
    compare_options, custom_option_label, parse_compare_prompt, PERIOD_COMPARE_KEY, PERIOD_MAIN_KEY,
};
pub use config::{load_config, DashboardConfig, WidgetConfig, WidgetKind, EMBEDDED_CONFIG};
pub use metrics::{compute, snapshot, DerivedMetrics, MetricKey, MetricsSnapshot};
pub use period::{derive_for_period, CustomDays, PeriodSelector, PeriodState};
pub use state::{normalize, normalize_with, BaseState, RawState, StateField};
pub use store::DashboardStore;
