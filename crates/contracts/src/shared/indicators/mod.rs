use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Display metadata for numeric indicators
// ---------------------------------------------------------------------------

/// How a numeric value is rendered by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueFormat {
    /// Whole number, digit grouping, no decimals.
    #[default]
    Number,
    /// Money amount, exactly two decimals.
    Currency,
    /// Percentage in 0..100, up to two decimals.
    Percent,
}

impl ValueFormat {
    /// Minimum and maximum number of fraction digits shown.
    pub fn fraction_digits(&self) -> (u8, u8) {
        match self {
            ValueFormat::Number => (0, 0),
            ValueFormat::Currency => (2, 2),
            ValueFormat::Percent => (0, 2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueFormat::Number => "number",
            ValueFormat::Currency => "currency",
            ValueFormat::Percent => "percent",
        }
    }
}

/// Visual decoration around a formatted value, e.g. `R$ 1.234,00` or `5%`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ValueAffix {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
}

impl ValueAffix {
    /// Wrap already formatted text: prefix is separated by a space, suffix is glued.
    pub fn apply(&self, formatted: &str) -> String {
        let mut text = formatted.to_string();
        if !self.prefix.is_empty() {
            text = format!("{} {}", self.prefix, text);
        }
        if !self.suffix.is_empty() {
            text.push_str(&self.suffix);
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_affix_apply() {
        let affix = ValueAffix {
            prefix: "R$".to_string(),
            suffix: String::new(),
        };
        assert_eq!(affix.apply("10,00"), "R$ 10,00");

        let pct = ValueAffix {
            prefix: String::new(),
            suffix: "%".to_string(),
        };
        assert_eq!(pct.apply("5"), "5%");
        assert_eq!(ValueAffix::default().apply("7"), "7");
    }

    #[test]
    fn test_format_serde_names() {
        let f: ValueFormat = serde_json::from_str("\"currency\"").unwrap();
        assert_eq!(f, ValueFormat::Currency);
        assert_eq!(ValueFormat::Percent.fraction_digits(), (0, 2));
        assert_eq!(ValueFormat::default().as_str(), "number");
    }
}
