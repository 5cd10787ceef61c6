//! Base figures entered by the operator and their normalization.
//!
//! `RawState` is whatever arrives from storage or input widgets, `BaseState`
//! is the canonical record every computation works on. The only way from one
//! to the other is [`normalize`], which never fails.

use crate::shared::number_parse::{CommaDecimal, NumberLocale};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Largest count kept exact in `f64` (2^53 - 1). Counts above it are clamped.
pub const MAX_COUNT: f64 = 9_007_199_254_740_991.0;

/// Upper bound for money, rate and per-sale inputs. Far above any real figure;
/// only exists so a product of three inputs cannot reach infinity.
pub const MAX_AMOUNT: f64 = 1e100;

/// Smallest accepted `units_per_sale`.
pub const MIN_UNITS_PER_SALE: f64 = 0.1;

/// Fee rate is a percentage.
pub const MAX_FEE_RATE: f64 = 100.0;

/// Canonical, clamped base figures for the baseline period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseState {
    pub sales_count: u64,
    pub avg_sale_price: f64,
    pub units_per_sale: f64,
    pub visits: u64,
    /// Never greater than `sales_count`.
    pub canceled_sales: u64,
    pub cost_per_unit: f64,
    /// Percentage in `0..=100`.
    pub fee_rate: f64,
    pub ad_spend: f64,
    pub other_costs: f64,
}

impl Default for BaseState {
    fn default() -> Self {
        Self {
            sales_count: 0,
            avg_sale_price: 0.0,
            units_per_sale: 1.0,
            visits: 0,
            canceled_sales: 0,
            cost_per_unit: 0.0,
            fee_rate: 0.0,
            ad_spend: 0.0,
            other_costs: 0.0,
        }
    }
}

impl BaseState {
    /// Re-apply every clamp to an already typed state.
    pub fn normalized(&self) -> Self {
        clamp(Coerced {
            sales_count: self.sales_count as f64,
            avg_sale_price: self.avg_sale_price,
            units_per_sale: self.units_per_sale,
            visits: self.visits as f64,
            canceled_sales: self.canceled_sales as f64,
            cost_per_unit: self.cost_per_unit,
            fee_rate: self.fee_rate,
            ad_spend: self.ad_spend,
            other_costs: self.other_costs,
        })
    }

    pub fn value(&self, field: StateField) -> f64 {
        match field {
            StateField::SalesCount => self.sales_count as f64,
            StateField::AvgSalePrice => self.avg_sale_price,
            StateField::UnitsPerSale => self.units_per_sale,
            StateField::Visits => self.visits as f64,
            StateField::CanceledSales => self.canceled_sales as f64,
            StateField::CostPerUnit => self.cost_per_unit,
            StateField::FeeRate => self.fee_rate,
            StateField::AdSpend => self.ad_spend,
            StateField::OtherCosts => self.other_costs,
        }
    }
}

/// Untyped base figures: each field holds whatever JSON value was stored or
/// typed. Missing fields take the defaults of [`BaseState`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawState {
    pub sales_count: Value,
    pub avg_sale_price: Value,
    pub units_per_sale: Value,
    pub visits: Value,
    pub canceled_sales: Value,
    pub cost_per_unit: Value,
    pub fee_rate: Value,
    pub ad_spend: Value,
    pub other_costs: Value,
}

impl Default for RawState {
    fn default() -> Self {
        Self::from(&BaseState::default())
    }
}

impl From<&BaseState> for RawState {
    fn from(state: &BaseState) -> Self {
        let mut raw = RawState {
            sales_count: Value::Null,
            avg_sale_price: Value::Null,
            units_per_sale: Value::Null,
            visits: Value::Null,
            canceled_sales: Value::Null,
            cost_per_unit: Value::Null,
            fee_rate: Value::Null,
            ad_spend: Value::Null,
            other_costs: Value::Null,
        };
        for field in StateField::ALL {
            *raw.slot_mut(field) = number_value(state.value(field));
        }
        raw
    }
}

impl RawState {
    /// Accept a parsed JSON blob only when it is an object; anything else is
    /// treated as absent.
    pub fn from_json_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(_) => serde_json::from_value(value).ok(),
            _ => None,
        }
    }

    pub fn get(&self, field: StateField) -> &Value {
        match field {
            StateField::SalesCount => &self.sales_count,
            StateField::AvgSalePrice => &self.avg_sale_price,
            StateField::UnitsPerSale => &self.units_per_sale,
            StateField::Visits => &self.visits,
            StateField::CanceledSales => &self.canceled_sales,
            StateField::CostPerUnit => &self.cost_per_unit,
            StateField::FeeRate => &self.fee_rate,
            StateField::AdSpend => &self.ad_spend,
            StateField::OtherCosts => &self.other_costs,
        }
    }

    fn slot_mut(&mut self, field: StateField) -> &mut Value {
        match field {
            StateField::SalesCount => &mut self.sales_count,
            StateField::AvgSalePrice => &mut self.avg_sale_price,
            StateField::UnitsPerSale => &mut self.units_per_sale,
            StateField::Visits => &mut self.visits,
            StateField::CanceledSales => &mut self.canceled_sales,
            StateField::CostPerUnit => &mut self.cost_per_unit,
            StateField::FeeRate => &mut self.fee_rate,
            StateField::AdSpend => &mut self.ad_spend,
            StateField::OtherCosts => &mut self.other_costs,
        }
    }

    /// Store the text typed into an input widget, as-is.
    pub fn set_text(&mut self, field: StateField, text: impl Into<String>) {
        *self.slot_mut(field) = Value::String(text.into());
    }

    /// Text an input widget should display for `field`.
    pub fn text(&self, field: StateField) -> String {
        match self.get(field) {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.as_f64().map(|v| v.to_string()).unwrap_or_default(),
            Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}

fn number_value(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

/// The nine editable base fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateField {
    SalesCount,
    AvgSalePrice,
    UnitsPerSale,
    Visits,
    CanceledSales,
    CostPerUnit,
    FeeRate,
    AdSpend,
    OtherCosts,
}

impl StateField {
    pub const ALL: [StateField; 9] = [
        StateField::SalesCount,
        StateField::AvgSalePrice,
        StateField::UnitsPerSale,
        StateField::Visits,
        StateField::CanceledSales,
        StateField::CostPerUnit,
        StateField::FeeRate,
        StateField::AdSpend,
        StateField::OtherCosts,
    ];

    /// Key used in persisted blobs and widget bindings.
    pub fn key(&self) -> &'static str {
        match self {
            StateField::SalesCount => "salesCount",
            StateField::AvgSalePrice => "avgSalePrice",
            StateField::UnitsPerSale => "unitsPerSale",
            StateField::Visits => "visits",
            StateField::CanceledSales => "canceledSales",
            StateField::CostPerUnit => "costPerUnit",
            StateField::FeeRate => "feeRate",
            StateField::AdSpend => "adSpend",
            StateField::OtherCosts => "otherCosts",
        }
    }

    /// Label for the admin panel.
    pub fn label(&self) -> &'static str {
        match self {
            StateField::SalesCount => "Sales (30 days)",
            StateField::AvgSalePrice => "Average sale price",
            StateField::UnitsPerSale => "Units per sale",
            StateField::Visits => "Visits",
            StateField::CanceledSales => "Canceled sales",
            StateField::CostPerUnit => "Cost per unit",
            StateField::FeeRate => "Platform fee (%)",
            StateField::AdSpend => "Ad spend",
            StateField::OtherCosts => "Other costs",
        }
    }

    /// Whether the field holds a whole count.
    pub fn is_count(&self) -> bool {
        matches!(
            self,
            StateField::SalesCount | StateField::Visits | StateField::CanceledSales
        )
    }
}

// ---------------------------------------------------------------------------
// Normalization
// ---------------------------------------------------------------------------

/// Normalize with the default comma-decimal input notation.
pub fn normalize(raw: &RawState) -> BaseState {
    normalize_with(raw, &CommaDecimal)
}

/// Normalize, reading text values with `locale`.
pub fn normalize_with(raw: &RawState, locale: &dyn NumberLocale) -> BaseState {
    let num = |field: StateField| coerce(raw.get(field), locale);
    clamp(Coerced {
        sales_count: num(StateField::SalesCount),
        avg_sale_price: num(StateField::AvgSalePrice),
        units_per_sale: num(StateField::UnitsPerSale),
        visits: num(StateField::Visits),
        canceled_sales: num(StateField::CanceledSales),
        cost_per_unit: num(StateField::CostPerUnit),
        fee_rate: num(StateField::FeeRate),
        ad_spend: num(StateField::AdSpend),
        other_costs: num(StateField::OtherCosts),
    })
}

/// Any JSON value to a finite number; everything unusable becomes 0.
pub fn coerce(value: &Value, locale: &dyn NumberLocale) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => locale.parse(s),
        _ => None,
    };
    parsed.filter(|v| v.is_finite()).unwrap_or(0.0)
}

struct Coerced {
    sales_count: f64,
    avg_sale_price: f64,
    units_per_sale: f64,
    visits: f64,
    canceled_sales: f64,
    cost_per_unit: f64,
    fee_rate: f64,
    ad_spend: f64,
    other_costs: f64,
}

// order matters: canceled_sales is bounded by the clamped sales_count
fn clamp(c: Coerced) -> BaseState {
    let sales_count = count(c.sales_count);
    let avg_sale_price = non_negative(c.avg_sale_price);
    let units_per_sale = {
        let v = if c.units_per_sale > 0.0 {
            c.units_per_sale
        } else {
            1.0
        };
        v.clamp(MIN_UNITS_PER_SALE, MAX_AMOUNT)
    };
    let visits = count(c.visits);
    let canceled_sales = count(c.canceled_sales).min(sales_count);
    let cost_per_unit = non_negative(c.cost_per_unit);
    let fee_rate = if c.fee_rate > 0.0 {
        c.fee_rate.min(MAX_FEE_RATE)
    } else {
        0.0
    };
    let ad_spend = non_negative(c.ad_spend);
    let other_costs = non_negative(c.other_costs);

    BaseState {
        sales_count,
        avg_sale_price,
        units_per_sale,
        visits,
        canceled_sales,
        cost_per_unit,
        fee_rate,
        ad_spend,
        other_costs,
    }
}

fn non_negative(v: f64) -> f64 {
    if v > 0.0 {
        v.min(MAX_AMOUNT)
    } else {
        0.0
    }
}

fn count(v: f64) -> u64 {
    let rounded = v.round();
    if rounded > 0.0 {
        rounded.min(MAX_COUNT) as u64
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawState {
        RawState::from_json_value(value).unwrap()
    }

    fn assert_bounds(s: &BaseState) {
        assert!(s.canceled_sales <= s.sales_count);
        assert!((0.0..=MAX_FEE_RATE).contains(&s.fee_rate));
        assert!(s.units_per_sale >= MIN_UNITS_PER_SALE);
        for field in StateField::ALL {
            let v = s.value(field);
            assert!(v.is_finite(), "{} not finite", field.key());
            assert!(v >= 0.0, "{} negative", field.key());
            let cap = if field.is_count() { MAX_COUNT } else { MAX_AMOUNT };
            assert!(v <= cap, "{} above cap", field.key());
        }
    }

    #[test]
    fn test_empty_record_gives_defaults() {
        let s = normalize(&raw(json!({})));
        assert_eq!(s, BaseState::default());
        assert_eq!(s.units_per_sale, 1.0);
    }

    #[test]
    fn test_string_inputs() {
        let s = normalize(&raw(json!({
            "salesCount": "12,6",
            "avgSalePrice": "49,90",
            "unitsPerSale": "2",
            "visits": " 300 ",
            "canceledSales": "1.4",
            "costPerUnit": "abc",
            "feeRate": "12,5",
            "adSpend": "",
            "otherCosts": null
        })));
        assert_eq!(s.sales_count, 13);
        assert_eq!(s.avg_sale_price, 49.9);
        assert_eq!(s.units_per_sale, 2.0);
        assert_eq!(s.visits, 300);
        assert_eq!(s.canceled_sales, 1);
        assert_eq!(s.cost_per_unit, 0.0);
        assert_eq!(s.fee_rate, 12.5);
        assert_eq!(s.ad_spend, 0.0);
        assert_eq!(s.other_costs, 0.0);
    }

    #[test]
    fn test_clamps() {
        let s = normalize(&raw(json!({
            "salesCount": -5,
            "avgSalePrice": -1,
            "unitsPerSale": 0.01,
            "visits": -10,
            "canceledSales": 3,
            "costPerUnit": -2,
            "feeRate": 250,
            "adSpend": -100,
            "otherCosts": -0.5
        })));
        assert_eq!(s.sales_count, 0);
        assert_eq!(s.avg_sale_price, 0.0);
        assert_eq!(s.units_per_sale, MIN_UNITS_PER_SALE);
        assert_eq!(s.visits, 0);
        assert_eq!(s.canceled_sales, 0);
        assert_eq!(s.fee_rate, 100.0);
        assert_eq!(s.ad_spend, 0.0);
        assert_bounds(&s);
    }

    #[test]
    fn test_units_per_sale_fallback() {
        for v in [json!(0), json!("0"), json!("x"), json!(-3), json!(null), json!(true)] {
            let s = normalize(&raw(json!({ "unitsPerSale": v })));
            assert_eq!(s.units_per_sale, 1.0);
        }
    }

    #[test]
    fn test_canceled_bounded_by_sales() {
        let s = normalize(&raw(json!({ "salesCount": 10, "canceledSales": 25 })));
        assert_eq!(s.canceled_sales, 10);
    }

    #[test]
    fn test_huge_inputs_are_capped() {
        let s = normalize(&raw(json!({
            "salesCount": 1e300,
            "avgSalePrice": "9e199",
            "visits": "1e308"
        })));
        assert_eq!(s.sales_count, MAX_COUNT as u64);
        assert_eq!(s.visits, MAX_COUNT as u64);
        assert_eq!(s.avg_sale_price, MAX_AMOUNT);
        assert_bounds(&s);
    }

    #[test]
    fn test_large_realistic_inputs_are_untouched() {
        let s = normalize(&raw(json!({
            "salesCount": 2e15,
            "canceledSales": "1500000000000000",
            "avgSalePrice": 3.5e20,
            "adSpend": "1e40"
        })));
        assert_eq!(s.sales_count, 2_000_000_000_000_000);
        assert_eq!(s.canceled_sales, 1_500_000_000_000_000);
        assert_eq!(s.avg_sale_price, 3.5e20);
        assert_eq!(s.ad_spend, 1e40);
    }

    #[test]
    fn test_idempotent_over_hostile_grid() {
        let values = [
            json!(null),
            json!(""),
            json!("NaN"),
            json!("Infinity"),
            json!("-1e999"),
            json!(-7.5),
            json!(0),
            json!(0.04),
            json!("3,5"),
            json!(42),
            json!(150),
            json!(1e20),
            json!(true),
            json!([1, 2]),
            json!({ "a": 1 }),
        ];
        for (i, v) in values.iter().enumerate() {
            let other = &values[(i * 7 + 3) % values.len()];
            let input = raw(json!({
                "salesCount": v,
                "avgSalePrice": other,
                "unitsPerSale": v,
                "visits": other,
                "canceledSales": other,
                "costPerUnit": v,
                "feeRate": other,
                "adSpend": v,
                "otherCosts": other
            }));
            let once = normalize(&input);
            assert_bounds(&once);
            let twice = normalize(&RawState::from(&once));
            assert_eq!(once, twice);
            assert_eq!(once.normalized(), once);
        }
    }

    #[test]
    fn test_non_object_blob_rejected() {
        assert!(RawState::from_json_value(json!(5)).is_none());
        assert!(RawState::from_json_value(json!([1, 2, 3])).is_none());
        assert!(RawState::from_json_value(json!("state")).is_none());
    }

    #[test]
    fn test_text_round_trip() {
        let mut draft = RawState::default();
        assert_eq!(draft.text(StateField::UnitsPerSale), "1");
        assert_eq!(draft.text(StateField::SalesCount), "0");

        draft.set_text(StateField::AvgSalePrice, "12,");
        assert_eq!(draft.text(StateField::AvgSalePrice), "12,");
        assert_eq!(normalize(&draft).avg_sale_price, 12.0);

        let committed = RawState::from(&normalize(&draft));
        assert_eq!(committed.text(StateField::AvgSalePrice), "12");
    }

    #[test]
    fn test_serialized_keys_are_camel_case() {
        let value = serde_json::to_value(BaseState::default()).unwrap();
        for field in StateField::ALL {
            assert!(value.get(field.key()).is_some(), "missing {}", field.key());
        }
    }
}
