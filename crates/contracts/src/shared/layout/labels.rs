use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Text shown when neither the operator nor the configuration gave one.
pub const EMPTY_LABEL: &str = "—";

/// Operator-edited label texts, keyed by edit key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelState(BTreeMap<String, String>);

impl LabelState {
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(entries) = value else {
            return Self::default();
        };
        Self(
            entries
                .into_iter()
                .filter_map(|(key, v)| match v {
                    Value::String(s) => Some((key, s)),
                    _ => None,
                })
                .collect(),
        )
    }

    /// Raw stored text, blanks included.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Overwrite a stored text without trimming or fallback.
    pub fn insert(&mut self, key: &str, text: impl Into<String>) {
        self.0.insert(key.to_string(), text.into());
    }

    /// Stored text, or `fallback` when nothing (or only blanks) was stored.
    pub fn text_or(&self, key: &str, fallback: &str) -> String {
        match self.0.get(key) {
            Some(text) if !text.trim().is_empty() => text.clone(),
            _ => fallback_text(fallback),
        }
    }

    /// Commit an edit. Blank input reverts to `fallback`. Returns the text
    /// that ends up displayed.
    pub fn commit(&mut self, key: &str, text: &str, fallback: &str) -> String {
        let trimmed = text.trim();
        let value = if trimmed.is_empty() {
            fallback_text(fallback)
        } else {
            trimmed.to_string()
        };
        self.0.insert(key.to_string(), value.clone());
        value
    }

    /// Forget every edit and store the defaults instead.
    pub fn reset<'a>(&mut self, defaults: impl IntoIterator<Item = (&'a str, &'a str)>) {
        self.0.clear();
        for (key, fallback) in defaults {
            self.0.insert(key.to_string(), fallback_text(fallback));
        }
    }
}

fn fallback_text(fallback: &str) -> String {
    let trimmed = fallback.trim();
    if trimmed.is_empty() {
        EMPTY_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_or() {
        let labels = LabelState::from_json_value(json!({
            "storeName": "Acme",
            "headline": "   ",
            "count": 5
        }));
        assert_eq!(labels.text_or("storeName", "My store"), "Acme");
        assert_eq!(labels.text_or("headline", "Overview"), "Overview");
        assert_eq!(labels.text_or("count", "Orders"), "Orders");
        assert_eq!(labels.text_or("missing", ""), EMPTY_LABEL);
    }

    #[test]
    fn test_commit_trims_and_falls_back() {
        let mut labels = LabelState::default();
        assert_eq!(labels.commit("storeName", "  Acme  ", "My store"), "Acme");
        assert_eq!(labels.text_or("storeName", "My store"), "Acme");
        assert_eq!(labels.commit("storeName", "\n", "My store"), "My store");
        assert_eq!(labels.text_or("storeName", "x"), "My store");
    }

    #[test]
    fn test_reset_after_commit_shows_defaults_again() {
        let mut labels = LabelState::default();
        labels.commit("headline", "Black Friday", "Sales overview");
        assert_eq!(labels.text_or("headline", "Sales overview"), "Black Friday");
        labels.reset([("headline", "Sales overview")]);
        assert_eq!(labels.text_or("headline", "Sales overview"), "Sales overview");
        assert_eq!(labels.get("headline"), Some("Sales overview"));
    }

    #[test]
    fn test_reset() {
        let mut labels = LabelState::default();
        labels.commit("a", "edited", "A");
        labels.commit("stale", "old", "S");
        labels.reset([("a", "A"), ("b", "")]);
        assert_eq!(labels.text_or("a", "?"), "A");
        assert_eq!(labels.text_or("b", "?"), EMPTY_LABEL);
        assert_eq!(labels.text_or("stale", "fresh"), "fresh");
    }
}
