use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Which widgets are shown. Only an explicit `false` hides a widget.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityMap(BTreeMap<String, bool>);

impl VisibilityMap {
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(entries) = value else {
            return Self::default();
        };
        Self(
            entries
                .into_iter()
                .filter_map(|(key, v)| v.as_bool().map(|b| (key, b)))
                .collect(),
        )
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.0.get(key) != Some(&false)
    }

    pub fn set(&mut self, key: &str, visible: bool) {
        self.0.insert(key.to_string(), visible);
    }

    /// Show or hide every widget in `keys`.
    pub fn set_all<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>, visible: bool) {
        for key in keys {
            self.set(key, visible);
        }
    }

    pub fn hidden_count(&self) -> usize {
        self.0.values().filter(|v| !**v).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_means_visible() {
        let map = VisibilityMap::default();
        assert!(map.is_visible("netProfit"));
    }

    #[test]
    fn test_only_false_hides() {
        let map = VisibilityMap::from_json_value(json!({
            "a": false,
            "b": true,
            "c": 0,
            "d": null
        }));
        assert!(!map.is_visible("a"));
        assert!(map.is_visible("b"));
        assert!(map.is_visible("c"));
        assert!(map.is_visible("d"));
        assert_eq!(map.hidden_count(), 1);
    }

    #[test]
    fn test_set_all() {
        let mut map = VisibilityMap::default();
        map.set_all(["a", "b", "c"], false);
        assert_eq!(map.hidden_count(), 3);
        map.set_all(["b"], true);
        assert!(map.is_visible("b"));
        assert!(!map.is_visible("c"));
    }
}
