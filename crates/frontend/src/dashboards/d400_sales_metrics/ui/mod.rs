pub mod admin_panel;
pub mod canvas;
pub mod compare_select;
pub mod dashboard;
pub mod editable_label;
pub mod overlay_item;
pub mod period_dropdown;

pub use dashboard::SalesMetricsDashboard;
