//! Fail-soft count parsing
//!
//! Intake forms post counts as numbers, numeric strings, or garbage. None of
//! that is an error: anything unusable counts as zero.

use serde_json::Value;

/// Parse the leading integer of `raw`, or 0
///
/// - leading whitespace is skipped and an optional sign accepted
/// - the leading run of decimal digits is taken, the rest ignored
///   (`"3abc"` → 3, `"2.7"` → 2)
/// - no digits, negative values, and values beyond `u32` → 0
pub fn parse_count_or_zero(raw: &str) -> u32 {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if negative || digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}

/// Interpret a loosely-typed JSON count field
///
/// Strings and numbers go through [`parse_count_or_zero`]; `null`, booleans,
/// arrays, objects and absent fields are 0.
pub fn count_or_zero(value: Option<&Value>) -> u32 {
    match value {
        Some(Value::String(s)) => parse_count_or_zero(s),
        Some(Value::Number(n)) => parse_count_or_zero(&n.to_string()),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_plain_integers() {
        assert_eq!(parse_count_or_zero("0"), 0);
        assert_eq!(parse_count_or_zero("3"), 3);
        assert_eq!(parse_count_or_zero("+7"), 7);
        assert_eq!(parse_count_or_zero("  4"), 4);
    }

    #[test]
    fn test_leading_digits_taken() {
        assert_eq!(parse_count_or_zero("3abc"), 3);
        assert_eq!(parse_count_or_zero("2.7"), 2);
        assert_eq!(parse_count_or_zero("12 modules"), 12);
    }

    #[test]
    fn test_unusable_input_is_zero() {
        assert_eq!(parse_count_or_zero("abc"), 0);
        assert_eq!(parse_count_or_zero(""), 0);
        assert_eq!(parse_count_or_zero("   "), 0);
        assert_eq!(parse_count_or_zero("-2"), 0);
        assert_eq!(parse_count_or_zero("-"), 0);
        assert_eq!(parse_count_or_zero("99999999999999999999"), 0);
    }

    #[test]
    fn test_json_values() {
        assert_eq!(count_or_zero(Some(&json!(5))), 5);
        assert_eq!(count_or_zero(Some(&json!("5"))), 5);
        assert_eq!(count_or_zero(Some(&json!(2.9))), 2);
        assert_eq!(count_or_zero(Some(&json!(-1))), 0);
        assert_eq!(count_or_zero(Some(&json!(true))), 0);
        assert_eq!(count_or_zero(Some(&json!(null))), 0);
        assert_eq!(count_or_zero(Some(&json!([1]))), 0);
        assert_eq!(count_or_zero(None), 0);
    }
}
