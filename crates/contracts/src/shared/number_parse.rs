//! Lenient parsing of user-typed numbers.
//!
//! Input widgets hand over whatever the operator typed. The parser never
//! fails loudly: it returns `None` and the caller decides on a fallback.

/// Locale-specific reading of a decimal literal typed by a user.
pub trait NumberLocale {
    /// Parse `text` into a finite number, or `None` if nothing usable is found.
    fn parse(&self, text: &str) -> Option<f64>;
}

/// Comma-for-decimal-point notation (`"12,5"` is twelve and a half).
///
/// The first comma becomes a period, then the longest leading decimal literal
/// is read, so `"12,5 kg"` gives `12.5` and `"1,234.56"` gives `1.234`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommaDecimal;

impl NumberLocale for CommaDecimal {
    fn parse(&self, text: &str) -> Option<f64> {
        let normalized = text.replacen(',', ".", 1);
        parse_leading_decimal(&normalized)
    }
}

/// Period-for-decimal-point notation, no rewriting.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointDecimal;

impl NumberLocale for PointDecimal {
    fn parse(&self, text: &str) -> Option<f64> {
        parse_leading_decimal(text)
    }
}

/// Read the longest prefix of `text` (after leading whitespace) that forms a
/// decimal literal: `[+-]digits[.digits][e[+-]digits]`.
pub fn parse_leading_decimal(text: &str) -> Option<f64> {
    let s = text.trim_start().as_bytes();
    let mut end = 0;

    if matches!(s.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < s.len() && s[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < s.len() && s[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < s.len() && s[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        let frac_digits = frac_end - frac_start;
        if digits > 0 || frac_digits > 0 {
            end = frac_end;
            digits += frac_digits;
        }
    }

    if digits == 0 {
        return None;
    }

    // exponent is only taken when it is complete
    if end < s.len() && (s[end] == b'e' || s[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < s.len() && (s[exp_end] == b'+' || s[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < s.len() && s[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    let literal = std::str::from_utf8(&s[..end]).ok()?;
    literal.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Read the leading integer part of `text` (like a lenient `parseInt`).
pub fn parse_leading_integer(text: &str) -> Option<i64> {
    let s = text.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_decimal() {
        let locale = CommaDecimal;
        assert_eq!(locale.parse("12,5"), Some(12.5));
        assert_eq!(locale.parse("12.5"), Some(12.5));
        assert_eq!(locale.parse(" 7"), Some(7.0));
        assert_eq!(locale.parse("1,234.56"), Some(1.234));
        assert_eq!(locale.parse("-3,75"), Some(-3.75));
    }

    #[test]
    fn test_leading_literal() {
        assert_eq!(parse_leading_decimal("42abc"), Some(42.0));
        assert_eq!(parse_leading_decimal(".5"), Some(0.5));
        assert_eq!(parse_leading_decimal("5."), Some(5.0));
        assert_eq!(parse_leading_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_leading_decimal("2e"), Some(2.0));
        assert_eq!(parse_leading_decimal("1.2.3"), Some(1.2));
    }

    #[test]
    fn test_unparseable() {
        let locale = CommaDecimal;
        assert_eq!(locale.parse(""), None);
        assert_eq!(locale.parse("abc"), None);
        assert_eq!(locale.parse("-"), None);
        assert_eq!(locale.parse("."), None);
        assert_eq!(locale.parse("Infinity"), None);
        assert_eq!(locale.parse("NaN"), None);
        assert_eq!(locale.parse("1e999"), None);
    }

    #[test]
    fn test_point_decimal_keeps_comma() {
        assert_eq!(PointDecimal.parse("12,5"), Some(12.0));
    }

    #[test]
    fn test_leading_integer() {
        assert_eq!(parse_leading_integer("15"), Some(15));
        assert_eq!(parse_leading_integer("15.9"), Some(15));
        assert_eq!(parse_leading_integer(" 9 days"), Some(9));
        assert_eq!(parse_leading_integer("-4"), Some(-4));
        assert_eq!(parse_leading_integer("days"), None);
        assert_eq!(parse_leading_integer(""), None);
    }
}
