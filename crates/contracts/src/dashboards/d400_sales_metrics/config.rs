//! Canvas and widget layout configuration.
//!
//! A default layout is embedded in the binary. A deployment may ship its own
//! `dashboard.toml`; when it cannot be used the embedded one takes over.

use super::metrics::MetricKey;
use crate::shared::indicators::{ValueAffix, ValueFormat};
use crate::shared::layout::labels::EMPTY_LABEL;
use crate::shared::layout::Position;
use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Widget #{index} has an empty key")]
    EmptyKey { index: usize },

    #[error("Duplicate widget key '{0}'")]
    DuplicateKey(String),

    #[error("Metric widget '{0}' does not name a metric")]
    MissingMetric(String),

    #[error("Widget '{key}' has position ({x}, {y}) outside 0..100")]
    PositionOutOfRange { key: String, x: f64, y: f64 },

    #[error("Only one period widget of each kind is allowed, found another at '{0}'")]
    DuplicatePeriodWidget(String),

    #[error("Canvas reference width must be positive, got {0}")]
    InvalidReferenceWidth(f64),
}

/// Default layout embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[canvas]
reference_width = 1381

[[widgets]]
key = "storeName"
title = "Store name"
kind = "label"
default_text = "My Store"
x = 8
y = 6

[[widgets]]
key = "headline"
title = "Headline"
kind = "label"
default_text = "Sales overview"
x = 8
y = 12

[[widgets]]
key = "periodMain"
title = "Period"
kind = "period"
x = 78
y = 6

[[widgets]]
key = "periodCompare"
title = "Compared with"
kind = "period_compare"
default_text = "Last month"
x = 78
y = 14

[[widgets]]
key = "grossSales"
title = "Gross sales"
kind = "metric"
metric = "grossSales"
prefix = "R$"
x = 10
y = 28

[[widgets]]
key = "salesCount"
title = "Sales"
kind = "metric"
metric = "salesCount"
x = 30
y = 28

[[widgets]]
key = "unitsSold"
title = "Units sold"
kind = "metric"
metric = "unitsSold"
x = 50
y = 28

[[widgets]]
key = "avgUnitPrice"
title = "Average unit price"
kind = "metric"
metric = "avgUnitPrice"
prefix = "R$"
x = 70
y = 28

[[widgets]]
key = "visits"
title = "Visits"
kind = "metric"
metric = "visits"
x = 10
y = 46

[[widgets]]
key = "conversion"
title = "Conversion"
kind = "metric"
metric = "conversion"
suffix = "%"
x = 30
y = 46

[[widgets]]
key = "canceledSales"
title = "Canceled sales"
kind = "metric"
metric = "canceledSales"
x = 50
y = 46

[[widgets]]
key = "cancelRate"
title = "Cancel rate"
kind = "metric"
metric = "cancelRate"
suffix = "%"
x = 70
y = 46

[[widgets]]
key = "netSales"
title = "Net sales"
kind = "metric"
metric = "netSales"
prefix = "R$"
x = 10
y = 64

[[widgets]]
key = "cogs"
title = "Cost of goods"
kind = "metric"
metric = "cogs"
prefix = "R$"
x = 30
y = 64

[[widgets]]
key = "platformFees"
title = "Platform fees"
kind = "metric"
metric = "platformFees"
prefix = "R$"
x = 50
y = 64

[[widgets]]
key = "adSpend"
title = "Ad spend"
kind = "metric"
metric = "adSpend"
prefix = "R$"
x = 70
y = 64

[[widgets]]
key = "grossProfit"
title = "Gross profit"
kind = "metric"
metric = "grossProfit"
prefix = "R$"
x = 10
y = 82

[[widgets]]
key = "netProfit"
title = "Net profit"
kind = "metric"
metric = "netProfit"
prefix = "R$"
x = 30
y = 82

[[widgets]]
key = "netMargin"
title = "Net margin"
kind = "metric"
metric = "netMargin"
suffix = "%"
x = 50
y = 82

[[widgets]]
key = "otherCosts"
title = "Other costs"
kind = "metric"
metric = "otherCosts"
prefix = "R$"
x = 70
y = 82
"#;

/// Embedded layout, parsed once.
pub static EMBEDDED_CONFIG: Lazy<DashboardConfig> =
    Lazy::new(|| match DashboardConfig::from_toml(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Embedded dashboard config is invalid: {}", e);
            DashboardConfig::default()
        }
    });

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub widgets: Vec<WidgetConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels at which widgets render at scale 1.
    #[serde(default = "default_reference_width")]
    pub reference_width: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            reference_width: default_reference_width(),
        }
    }
}

fn default_reference_width() -> f64 {
    1381.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetKind {
    /// Shows one metric value.
    Metric,
    /// Free text the operator can edit in place.
    Label,
    /// The period dropdown.
    Period,
    /// Caption of the comparison period, picked or typed freely.
    PeriodCompare,
}

/// One positionable element on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    pub key: String,
    #[serde(default)]
    pub title: String,
    pub kind: WidgetKind,
    #[serde(default)]
    pub metric: Option<MetricKey>,
    #[serde(default)]
    pub format: Option<ValueFormat>,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    #[serde(default)]
    pub default_text: Option<String>,
    pub x: f64,
    pub y: f64,
}

impl WidgetConfig {
    /// Name shown in the admin lists.
    pub fn title(&self) -> &str {
        if self.title.trim().is_empty() {
            &self.key
        } else {
            &self.title
        }
    }

    pub fn value_format(&self) -> ValueFormat {
        self.format
            .or_else(|| self.metric.map(|m| m.default_format()))
            .unwrap_or_default()
    }

    pub fn affix(&self) -> ValueAffix {
        ValueAffix {
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
        }
    }

    pub fn default_position(&self) -> Position {
        Position {
            x: self.x,
            y: self.y,
        }
    }

    /// Text of a label widget before the operator edits it.
    pub fn default_label(&self) -> &str {
        match self.default_text.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => EMPTY_LABEL,
        }
    }
}

impl DashboardConfig {
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: DashboardConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let width = self.canvas.reference_width;
        if !(width.is_finite() && width > 0.0) {
            return Err(ConfigError::InvalidReferenceWidth(width));
        }

        let mut seen = HashSet::new();
        let mut has_period = false;
        let mut has_compare = false;
        for (index, widget) in self.widgets.iter().enumerate() {
            if widget.key.trim().is_empty() {
                return Err(ConfigError::EmptyKey { index });
            }
            if !seen.insert(widget.key.as_str()) {
                return Err(ConfigError::DuplicateKey(widget.key.clone()));
            }
            let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
            if !in_range(widget.x) || !in_range(widget.y) {
                return Err(ConfigError::PositionOutOfRange {
                    key: widget.key.clone(),
                    x: widget.x,
                    y: widget.y,
                });
            }
            match widget.kind {
                WidgetKind::Metric if widget.metric.is_none() => {
                    return Err(ConfigError::MissingMetric(widget.key.clone()));
                }
                WidgetKind::Period if has_period => {
                    return Err(ConfigError::DuplicatePeriodWidget(widget.key.clone()));
                }
                WidgetKind::Period => has_period = true,
                WidgetKind::PeriodCompare if has_compare => {
                    return Err(ConfigError::DuplicatePeriodWidget(widget.key.clone()));
                }
                WidgetKind::PeriodCompare => has_compare = true,
                _ => {}
            }
        }
        Ok(())
    }

    pub fn widget(&self, key: &str) -> Option<&WidgetConfig> {
        self.widgets.iter().find(|w| w.key == key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.widgets.iter().map(|w| w.key.as_str())
    }

    /// `(edit key, default text)` of every widget whose text is stored with
    /// the labels.
    pub fn label_defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.widgets
            .iter()
            .filter(|w| matches!(w.kind, WidgetKind::Label | WidgetKind::PeriodCompare))
            .map(|w| (w.key.as_str(), w.default_label()))
    }
}

fn parse_override(text: &str) -> anyhow::Result<DashboardConfig> {
    DashboardConfig::from_toml(text).context("dashboard.toml is not a valid layout")
}

/// Pick the layout: a deployment-provided `dashboard.toml` when present and
/// valid, the embedded default otherwise.
pub fn load_config(provided: Option<&str>) -> DashboardConfig {
    match provided {
        Some(text) => match parse_override(text) {
            Ok(config) => {
                log::info!("Loaded dashboard.toml ({} widgets)", config.widgets.len());
                config
            }
            Err(e) => {
                log::warn!("{:#}; using embedded configuration", e);
                EMBEDDED_CONFIG.clone()
            }
        },
        None => {
            log::info!("Using default embedded configuration");
            EMBEDDED_CONFIG.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = DashboardConfig::from_toml(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.canvas.reference_width, 1381.0);
        assert_eq!(config.widgets.len(), 20);
        assert_eq!(*EMBEDDED_CONFIG, config);
    }

    #[test]
    fn test_widget_accessors() {
        let config = EMBEDDED_CONFIG.clone();
        let margin = config.widget("netMargin").unwrap();
        assert_eq!(margin.value_format(), ValueFormat::Percent);
        assert_eq!(margin.affix().apply("5"), "5%");
        assert_eq!(margin.default_position(), Position { x: 50.0, y: 82.0 });

        let store = config.widget("storeName").unwrap();
        assert_eq!(store.kind, WidgetKind::Label);
        assert_eq!(store.default_label(), "My Store");

        let labels: Vec<_> = config.label_defaults().collect();
        assert_eq!(
            labels,
            vec![
                ("storeName", "My Store"),
                ("headline", "Sales overview"),
                ("periodCompare", "Last month"),
            ]
        );
    }

    #[test]
    fn test_format_override_and_title_fallback() {
        let config = DashboardConfig::from_toml(
            r#"
            [[widgets]]
            key = "netProfit"
            kind = "metric"
            metric = "netProfit"
            format = "number"
            x = 1
            y = 1
            "#,
        )
        .unwrap();
        let w = config.widget("netProfit").unwrap();
        assert_eq!(w.value_format(), ValueFormat::Number);
        assert_eq!(w.title(), "netProfit");
        assert_eq!(config.canvas.reference_width, 1381.0);
    }

    #[test]
    fn test_validation_errors() {
        let dup = r#"
            [[widgets]]
            key = "a"
            kind = "label"
            x = 1
            y = 1
            [[widgets]]
            key = "a"
            kind = "label"
            x = 2
            y = 2
        "#;
        assert!(matches!(
            DashboardConfig::from_toml(dup),
            Err(ConfigError::DuplicateKey(k)) if k == "a"
        ));

        let no_metric = r#"
            [[widgets]]
            key = "m"
            kind = "metric"
            x = 1
            y = 1
        "#;
        assert!(matches!(
            DashboardConfig::from_toml(no_metric),
            Err(ConfigError::MissingMetric(_))
        ));

        let outside = r#"
            [[widgets]]
            key = "p"
            kind = "period"
            x = 120
            y = 1
        "#;
        assert!(matches!(
            DashboardConfig::from_toml(outside),
            Err(ConfigError::PositionOutOfRange { .. })
        ));

        let unknown_metric = r#"
            [[widgets]]
            key = "m"
            kind = "metric"
            metric = "revenue"
            x = 1
            y = 1
        "#;
        assert!(matches!(
            DashboardConfig::from_toml(unknown_metric),
            Err(ConfigError::Parse(_))
        ));

        let two_compares = r#"
            [[widgets]]
            key = "a"
            kind = "period_compare"
            x = 1
            y = 1
            [[widgets]]
            key = "b"
            kind = "period_compare"
            x = 2
            y = 2
        "#;
        assert!(matches!(
            DashboardConfig::from_toml(two_compares),
            Err(ConfigError::DuplicatePeriodWidget(k)) if k == "b"
        ));

        let bad_width = "[canvas]\nreference_width = 0\n";
        assert!(matches!(
            DashboardConfig::from_toml(bad_width),
            Err(ConfigError::InvalidReferenceWidth(_))
        ));
    }

    #[test]
    fn test_load_config_falls_back() {
        assert_eq!(load_config(None), *EMBEDDED_CONFIG);
        assert_eq!(load_config(Some("widgets = 5")), *EMBEDDED_CONFIG);

        let custom = load_config(Some(
            r#"
            [[widgets]]
            key = "only"
            kind = "label"
            x = 0
            y = 0
            "#,
        ));
        assert_eq!(custom.widgets.len(), 1);
    }
}
