//! Derived sales metrics.

use super::period::{derive_for_period, PeriodSelector};
use super::state::{BaseState, StateField};
use crate::shared::indicators::ValueFormat;
use serde::{Deserialize, Serialize};

/// Base figures plus everything computed from them, in one flat record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    #[serde(flatten)]
    pub base: BaseState,
    pub gross_sales: f64,
    pub units_sold: f64,
    pub avg_unit_price: f64,
    /// Percentage of visits that ended in a sale.
    pub conversion: f64,
    /// Percentage of sales that were canceled.
    pub cancel_rate: f64,
    pub net_sales_count: f64,
    pub canceled_revenue: f64,
    pub net_sales: f64,
    pub cogs: f64,
    pub platform_fees: f64,
    pub gross_profit: f64,
    /// May be negative.
    pub net_profit: f64,
    /// Net profit as a percentage of net sales. May be negative.
    pub net_margin: f64,
}

/// Compute every derived metric for `state`. Total: every division is guarded.
/// The state is re-clamped first, so hand-built records obey the same bounds.
pub fn compute(state: &BaseState) -> DerivedMetrics {
    let state = &state.normalized();
    let sales_count = state.sales_count as f64;
    let canceled_sales = state.canceled_sales as f64;
    let visits = state.visits as f64;

    let gross_sales = sales_count * state.avg_sale_price;
    let units_sold = sales_count * state.units_per_sale;
    let avg_unit_price = if units_sold > 0.0 {
        gross_sales / units_sold
    } else {
        0.0
    };
    let conversion = if visits > 0.0 {
        sales_count / visits * 100.0
    } else {
        0.0
    };
    let cancel_rate = if sales_count > 0.0 {
        canceled_sales / sales_count * 100.0
    } else {
        0.0
    };
    let net_sales_count = state.sales_count.saturating_sub(state.canceled_sales) as f64;
    let canceled_revenue = canceled_sales * state.avg_sale_price;
    let net_sales = gross_sales - canceled_revenue;
    let cogs = units_sold * state.cost_per_unit;
    let platform_fees = net_sales * (state.fee_rate / 100.0);
    let gross_profit = net_sales - cogs;
    let net_profit = gross_profit - platform_fees - state.ad_spend - state.other_costs;
    let net_margin = if net_sales > 0.0 {
        net_profit / net_sales * 100.0
    } else {
        0.0
    };

    DerivedMetrics {
        base: *state,
        gross_sales,
        units_sold,
        avg_unit_price,
        conversion,
        cancel_rate,
        net_sales_count,
        canceled_revenue,
        net_sales,
        cogs,
        platform_fees,
        gross_profit,
        net_profit,
        net_margin,
    }
}

/// Metrics for the active period, ready for display.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshot {
    pub metrics: DerivedMetrics,
    /// Figures were projected from the baseline; inputs must not be edited.
    pub is_derived: bool,
}

/// Project `base` onto `selector` and compute the metrics of the result.
pub fn snapshot(base: &BaseState, selector: &PeriodSelector) -> MetricsSnapshot {
    let period = derive_for_period(base, selector);
    MetricsSnapshot {
        metrics: compute(&period.state),
        is_derived: period.is_derived,
    }
}

// ---------------------------------------------------------------------------
// Metric keys
// ---------------------------------------------------------------------------

/// Every value a dashboard widget can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MetricKey {
    SalesCount,
    AvgSalePrice,
    UnitsPerSale,
    Visits,
    CanceledSales,
    CostPerUnit,
    FeeRate,
    AdSpend,
    OtherCosts,
    GrossSales,
    UnitsSold,
    AvgUnitPrice,
    Conversion,
    CancelRate,
    NetSalesCount,
    CanceledRevenue,
    NetSales,
    Cogs,
    PlatformFees,
    GrossProfit,
    NetProfit,
    NetMargin,
}

impl From<StateField> for MetricKey {
    fn from(field: StateField) -> Self {
        match field {
            StateField::SalesCount => MetricKey::SalesCount,
            StateField::AvgSalePrice => MetricKey::AvgSalePrice,
            StateField::UnitsPerSale => MetricKey::UnitsPerSale,
            StateField::Visits => MetricKey::Visits,
            StateField::CanceledSales => MetricKey::CanceledSales,
            StateField::CostPerUnit => MetricKey::CostPerUnit,
            StateField::FeeRate => MetricKey::FeeRate,
            StateField::AdSpend => MetricKey::AdSpend,
            StateField::OtherCosts => MetricKey::OtherCosts,
        }
    }
}

impl MetricKey {
    pub const DERIVED: [MetricKey; 13] = [
        MetricKey::GrossSales,
        MetricKey::UnitsSold,
        MetricKey::AvgUnitPrice,
        MetricKey::Conversion,
        MetricKey::CancelRate,
        MetricKey::NetSalesCount,
        MetricKey::CanceledRevenue,
        MetricKey::NetSales,
        MetricKey::Cogs,
        MetricKey::PlatformFees,
        MetricKey::GrossProfit,
        MetricKey::NetProfit,
        MetricKey::NetMargin,
    ];

    /// Every key: the nine base fields followed by the derived ones.
    pub fn all() -> impl Iterator<Item = MetricKey> {
        StateField::ALL
            .into_iter()
            .map(MetricKey::from)
            .chain(Self::DERIVED)
    }

    /// Format used when a widget does not override it.
    pub fn default_format(&self) -> ValueFormat {
        match self {
            MetricKey::SalesCount
            | MetricKey::Visits
            | MetricKey::CanceledSales
            | MetricKey::NetSalesCount
            | MetricKey::UnitsSold
            | MetricKey::UnitsPerSale => ValueFormat::Number,
            MetricKey::FeeRate
            | MetricKey::Conversion
            | MetricKey::CancelRate
            | MetricKey::NetMargin => ValueFormat::Percent,
            _ => ValueFormat::Currency,
        }
    }
}

impl DerivedMetrics {
    pub fn get(&self, key: MetricKey) -> f64 {
        match key {
            MetricKey::SalesCount => self.base.value(StateField::SalesCount),
            MetricKey::AvgSalePrice => self.base.avg_sale_price,
            MetricKey::UnitsPerSale => self.base.units_per_sale,
            MetricKey::Visits => self.base.value(StateField::Visits),
            MetricKey::CanceledSales => self.base.value(StateField::CanceledSales),
            MetricKey::CostPerUnit => self.base.cost_per_unit,
            MetricKey::FeeRate => self.base.fee_rate,
            MetricKey::AdSpend => self.base.ad_spend,
            MetricKey::OtherCosts => self.base.other_costs,
            MetricKey::GrossSales => self.gross_sales,
            MetricKey::UnitsSold => self.units_sold,
            MetricKey::AvgUnitPrice => self.avg_unit_price,
            MetricKey::Conversion => self.conversion,
            MetricKey::CancelRate => self.cancel_rate,
            MetricKey::NetSalesCount => self.net_sales_count,
            MetricKey::CanceledRevenue => self.canceled_revenue,
            MetricKey::NetSales => self.net_sales,
            MetricKey::Cogs => self.cogs,
            MetricKey::PlatformFees => self.platform_fees,
            MetricKey::GrossProfit => self.gross_profit,
            MetricKey::NetProfit => self.net_profit,
            MetricKey::NetMargin => self.net_margin,
        }
    }
}
