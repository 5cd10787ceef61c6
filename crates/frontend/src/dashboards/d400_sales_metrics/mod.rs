pub mod context;
pub mod ui;

pub use context::{use_sales_dashboard, SalesDashboardContext};
pub use ui::SalesMetricsDashboard;
