//! pt-BR number rendering for dashboard values: `.` groups thousands, `,`
//! separates decimals.

use contracts::shared::indicators::{ValueAffix, ValueFormat};

/// Formats `value` with between `min_decimals` and `max_decimals` fraction
/// digits. Non-finite input renders as zero: `1234567.891` with two
/// decimals gives `1.234.567,89`.
pub fn format_grouped(value: f64, min_decimals: u8, max_decimals: u8) -> String {
    let max_decimals = max_decimals.max(min_decimals);
    let safe = if value.is_finite() { value } else { 0.0 };
    let rounded = round_half_away(safe.abs(), max_decimals);

    let formatted = format!("{:.*}", max_decimals as usize, rounded);
    let (integer_part, fraction_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, f),
        None => (formatted.as_str(), ""),
    };

    let mut fraction = fraction_part.to_string();
    while fraction.len() > min_decimals as usize && fraction.ends_with('0') {
        fraction.pop();
    }

    let mut grouped = String::new();
    for (i, ch) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let mut result: String = grouped.chars().rev().collect();
    if !fraction.is_empty() {
        result.push(',');
        result.push_str(&fraction);
    }

    let is_zero = result.chars().all(|c| matches!(c, '0' | '.' | ','));
    if safe < 0.0 && !is_zero {
        result.insert(0, '-');
    }
    result
}

/// Formats a metric value by its display kind. Counts are rounded to whole
/// numbers first.
pub fn format_value(value: f64, format: ValueFormat) -> String {
    let (min, max) = format.fraction_digits();
    match format {
        ValueFormat::Number => format_grouped(round_half_away(value, 0), min, max),
        _ => format_grouped(value, min, max),
    }
}

/// [`format_value`] plus the widget's prefix and suffix.
pub fn format_with_affix(value: f64, format: ValueFormat, affix: &ValueAffix) -> String {
    affix.apply(&format_value(value, format))
}

fn round_half_away(value: f64, decimals: u8) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(decimals as i32);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}
