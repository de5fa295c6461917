//! Best-effort numeric coercion
//!
//! Form inputs hand over numbers either as JSON numbers or as whatever text
//! the user has typed so far ("1.", "", "abc"). Coercion never fails: text is
//! read the way a float parser reads a form field (longest leading numeric
//! prefix), and anything that does not yield a finite number becomes the
//! caller's fallback.

use serde::{Deserialize, Serialize};

/// A numeric form value: either already a number, or raw text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl From<f64> for RawNumber {
    fn from(n: f64) -> Self {
        RawNumber::Number(n)
    }
}

impl From<f32> for RawNumber {
    fn from(n: f32) -> Self {
        RawNumber::Number(f64::from(n))
    }
}

impl From<&str> for RawNumber {
    fn from(s: &str) -> Self {
        RawNumber::Text(s.to_string())
    }
}

impl From<String> for RawNumber {
    fn from(s: String) -> Self {
        RawNumber::Text(s)
    }
}

/// Coerce an optional raw value, returning `fallback` when it is absent or
/// does not read as a finite number
pub fn coerce(raw: Option<&RawNumber>, fallback: f64) -> f64 {
    match raw {
        Some(RawNumber::Number(n)) if n.is_finite() => *n,
        Some(RawNumber::Text(s)) => coerce_str(s, fallback),
        _ => fallback,
    }
}

/// Coerce text, returning `fallback` when no finite number can be read
pub fn coerce_str(raw: &str, fallback: f64) -> f64 {
    leading_float(raw)
        .filter(|n| n.is_finite())
        .unwrap_or(fallback)
}

/// Parse the longest numeric prefix after leading whitespace
fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_on_garbage() {
        assert_eq!(coerce_str("abc", 5.0), 5.0);
        assert_eq!(coerce(Some(&RawNumber::from("abc")), 5.0), 5.0);
    }

    #[test]
    fn test_plain_numbers() {
        assert_eq!(coerce_str("3.14", 5.0), 3.14);
        assert_eq!(coerce_str("-2", 0.0), -2.0);
        assert_eq!(coerce_str("+7", 0.0), 7.0);
        assert_eq!(coerce(Some(&RawNumber::Number(0.25)), 1.0), 0.25);
    }

    #[test]
    fn test_absent_and_empty() {
        assert_eq!(coerce(None, 0.0), 0.0);
        assert_eq!(coerce_str("", 1.0), 1.0);
        assert_eq!(coerce_str("   ", 1.0), 1.0);
    }

    #[test]
    fn test_mid_edit_text() {
        assert_eq!(coerce_str("1.", 0.0), 1.0);
        assert_eq!(coerce_str(".5", 0.0), 0.5);
        assert_eq!(coerce_str("-", 9.0), 9.0);
        assert_eq!(coerce_str(".", 9.0), 9.0);
        assert_eq!(coerce_str("1e", 0.0), 1.0);
        assert_eq!(coerce_str("1e-", 0.0), 1.0);
    }

    #[test]
    fn test_leading_prefix() {
        assert_eq!(coerce_str("  2.5px", 0.0), 2.5);
        assert_eq!(coerce_str("1e3", 0.0), 1000.0);
        assert_eq!(coerce_str("12abc34", 0.0), 12.0);
    }

    #[test]
    fn test_zero_is_kept() {
        assert_eq!(coerce_str("0", 1.0), 0.0);
        assert_eq!(coerce(Some(&RawNumber::Number(0.0)), 1.0), 0.0);
    }

    #[test]
    fn test_never_nan() {
        assert_eq!(coerce_str("NaN", 4.0), 4.0);
        assert_eq!(coerce_str("Infinity", 4.0), 4.0);
        assert_eq!(coerce_str("1e999", 4.0), 4.0);
        assert_eq!(coerce(Some(&RawNumber::Number(f64::NAN)), 4.0), 4.0);
    }

    #[test]
    fn test_untagged_deserialization() {
        let n: RawNumber = serde_json::from_str("1.5").unwrap();
        assert_eq!(n, RawNumber::Number(1.5));
        let t: RawNumber = serde_json::from_str(r#""1.5""#).unwrap();
        assert_eq!(t, RawNumber::Text("1.5".to_string()));
    }
}
