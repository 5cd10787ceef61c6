//! Caption of the comparison period shown next to the main period.
//!
//! Unlike the main period it does not drive any computation: it is a label
//! picked from the period names or typed freely, stored with the other labels.

use super::period::{CustomDays, PeriodSelector};
use crate::shared::layout::LabelState;

/// Label key of the main period in saved label sets.
pub const PERIOD_MAIN_KEY: &str = "periodMain";

/// Label key of the comparison caption.
pub const PERIOD_COMPARE_KEY: &str = "periodCompare";

/// Option that asks for a free-text caption instead of selecting itself.
pub fn custom_option_label() -> &'static str {
    "Custom period"
}

/// Options of the comparison select, in order. A caption that is none of the
/// fixed options is listed right before the custom option.
pub fn compare_options(current: &str) -> Vec<String> {
    let mut options: Vec<String> = PeriodSelector::NAMED
        .iter()
        .map(|p| p.label().to_string())
        .collect();
    let current = current.trim();
    if !current.is_empty()
        && current != custom_option_label()
        && !options.iter().any(|o| o == current)
    {
        options.push(current.to_string());
    }
    options.push(custom_option_label().to_string());
    options
}

/// Read an answer typed into the free-text prompt. Blank answers are ignored.
pub fn parse_compare_prompt(answer: &str) -> Option<String> {
    let trimmed = answer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Display form of a saved period caption: known and legacy period names map
/// to the current labels, free text is kept.
pub fn canonical_period_label(saved: &str) -> String {
    match PeriodSelector::from_key(saved, CustomDays::default()) {
        PeriodSelector::Other(text) => text,
        PeriodSelector::Custom(_) => custom_option_label().to_string(),
        named => named.label().to_string(),
    }
}

/// Bring the period captions of a saved label set up to date.
pub fn migrate_period_labels(labels: &mut LabelState) {
    for key in [PERIOD_MAIN_KEY, PERIOD_COMPARE_KEY] {
        let Some(saved) = labels.get(key) else {
            continue;
        };
        if saved.trim().is_empty() {
            continue;
        }
        let current = canonical_period_label(saved);
        if current != saved {
            log::debug!("Migrating saved '{}' caption '{}' to '{}'", key, saved, current);
            labels.insert(key, current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_options_keep_free_text() {
        let fixed = compare_options("Last month");
        assert_eq!(fixed.len(), 7);
        assert_eq!(fixed.first().map(String::as_str), Some("Today"));
        assert_eq!(fixed.last().map(String::as_str), Some("Custom period"));

        let typed = compare_options("Black Friday 2023");
        assert_eq!(typed.len(), 8);
        assert_eq!(typed[6], "Black Friday 2023");
        assert_eq!(typed[7], "Custom period");

        assert_eq!(compare_options("Custom period").len(), 7);
        assert_eq!(compare_options("  ").len(), 7);
    }

    #[test]
    fn test_prompt_answers() {
        assert_eq!(parse_compare_prompt("  Q3 2024 "), Some("Q3 2024".to_string()));
        assert_eq!(parse_compare_prompt("   "), None);
        assert_eq!(parse_compare_prompt(""), None);
    }

    #[test]
    fn test_legacy_captions_migrate() {
        let mut labels = LabelState::from_json_value(json!({
            "periodMain": "Últimos 7 dias",
            "periodCompare": "Personalizado",
            "storeName": "Personalizado"
        }));
        migrate_period_labels(&mut labels);
        assert_eq!(labels.get(PERIOD_MAIN_KEY), Some("Last 7 days"));
        assert_eq!(labels.get(PERIOD_COMPARE_KEY), Some("Custom period"));
        assert_eq!(labels.get("storeName"), Some("Personalizado"));

        let mut labels = LabelState::from_json_value(json!({
            "periodCompare": "Data personalizada"
        }));
        migrate_period_labels(&mut labels);
        assert_eq!(labels.get(PERIOD_COMPARE_KEY), Some("Custom period"));
    }

    #[test]
    fn test_free_text_caption_is_kept() {
        let mut labels = LabelState::from_json_value(json!({
            "periodCompare": "Mês passado"
        }));
        migrate_period_labels(&mut labels);
        assert_eq!(labels.get(PERIOD_COMPARE_KEY), Some("Last month"));

        let mut labels = LabelState::from_json_value(json!({
            "periodCompare": "Natal 2023",
        }));
        migrate_period_labels(&mut labels);
        assert_eq!(labels.get(PERIOD_COMPARE_KEY), Some("Natal 2023"));
    }
}
