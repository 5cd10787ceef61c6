use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

pub const MIN_SCALE: f64 = 0.5;
pub const MAX_SCALE: f64 = 2.5;

/// Per-widget scales this close to 1 are not stored.
const NEUTRAL_EPSILON: f64 = 0.001;

/// Clamp a scale factor into `MIN_SCALE..=MAX_SCALE`; non-finite gives `fallback`.
pub fn clamp_scale(value: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        return fallback;
    }
    value.clamp(MIN_SCALE, MAX_SCALE)
}

/// Slider value for a scale, e.g. `1.25` -> `125`.
pub fn scale_to_percent(scale: f64) -> u32 {
    (clamp_scale(scale, 1.0) * 100.0).round() as u32
}

pub fn percent_to_scale(percent: f64) -> f64 {
    clamp_scale(percent / 100.0, 1.0)
}

/// Global and per-widget scale factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeState {
    pub global: f64,
    pub items: BTreeMap<String, f64>,
}

impl Default for SizeState {
    fn default() -> Self {
        Self {
            global: 1.0,
            items: BTreeMap::new(),
        }
    }
}

impl SizeState {
    /// Clamp everything on the way in; neutral per-widget scales are dropped.
    pub fn from_json_value(value: Value) -> Self {
        let global = value
            .get("global")
            .and_then(loose_number)
            .map(|v| clamp_scale(v, 1.0))
            .unwrap_or(1.0);

        let mut state = Self {
            global,
            items: BTreeMap::new(),
        };
        if let Some(Value::Object(items)) = value.get("items") {
            for (key, raw) in items {
                let scale = loose_number(raw).unwrap_or(f64::NAN);
                state.set_item_scale(key, scale);
            }
        }
        state
    }

    pub fn item_scale(&self, key: &str) -> f64 {
        self.items
            .get(key)
            .map(|v| clamp_scale(*v, 1.0))
            .unwrap_or(1.0)
    }

    pub fn set_item_scale(&mut self, key: &str, scale: f64) {
        if key.is_empty() {
            return;
        }
        let scale = clamp_scale(scale, 1.0);
        if (scale - 1.0).abs() <= NEUTRAL_EPSILON {
            self.items.remove(key);
        } else {
            self.items.insert(key.to_string(), scale);
        }
    }

    pub fn set_global(&mut self, scale: f64) {
        self.global = clamp_scale(scale, 1.0);
    }

    pub fn reset_item(&mut self, key: &str) {
        self.items.remove(key);
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }
}

// numbers or numeric strings, like a loose `Number(value)`
fn loose_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clamp_scale() {
        assert_eq!(clamp_scale(0.1, 1.0), MIN_SCALE);
        assert_eq!(clamp_scale(9.0, 1.0), MAX_SCALE);
        assert_eq!(clamp_scale(f64::NAN, 1.0), 1.0);
        assert_eq!(clamp_scale(1.3, 1.0), 1.3);
    }

    #[test]
    fn test_percent_conversion() {
        assert_eq!(scale_to_percent(1.25), 125);
        assert_eq!(scale_to_percent(7.0), 250);
        assert_eq!(percent_to_scale(150.0), 1.5);
        assert_eq!(percent_to_scale(10.0), MIN_SCALE);
    }

    #[test]
    fn test_neutral_scale_removed() {
        let mut sizes = SizeState::default();
        sizes.set_item_scale("netProfit", 1.5);
        assert_eq!(sizes.item_scale("netProfit"), 1.5);
        sizes.set_item_scale("netProfit", 1.0005);
        assert!(sizes.items.is_empty());
        assert_eq!(sizes.item_scale("netProfit"), 1.0);
    }

    #[test]
    fn test_lenient_load() {
        let sizes = SizeState::from_json_value(json!({
            "global": 4,
            "items": { "a": 0.2, "b": "1.5", "c": 1, "d": "big" }
        }));
        assert_eq!(sizes.global, MAX_SCALE);
        assert_eq!(sizes.item_scale("a"), MIN_SCALE);
        assert_eq!(sizes.item_scale("b"), 1.5);
        assert!(!sizes.items.contains_key("c"));
        assert!(!sizes.items.contains_key("d"));

        assert_eq!(SizeState::from_json_value(json!("nope")), SizeState::default());
    }

    #[test]
    fn test_resets() {
        let mut sizes = SizeState::default();
        sizes.set_global(2.0);
        sizes.set_item_scale("a", 2.0);
        sizes.set_item_scale("b", 0.7);
        sizes.reset_item("a");
        assert_eq!(sizes.item_scale("a"), 1.0);
        assert_eq!(sizes.item_scale("b"), 0.7);
        sizes.reset_all();
        assert_eq!(sizes, SizeState::default());
    }
}
