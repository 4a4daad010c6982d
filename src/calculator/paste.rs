//! Validation of pasted clipboard text.
//!
//! Pasted text only reaches the engine if it is a finite number. Plain
//! decimal literals keep their spelling; anything else is reformatted so
//! the operand stays within the display bounds.

use super::format::{MAX_OPERAND_LEN, format_result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Matches a plain decimal literal: optional minus, digits, at most one dot.
    static ref PLAIN_DECIMAL: Regex = Regex::new(r"^-?\d+(\.\d*)?$").unwrap();
}

/// Turn pasted text into operand text.
///
/// Returns `None` if the text is not a finite number. Surrounding
/// whitespace is ignored; trailing garbage is not.
pub fn parse_pasted(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value: f64 = trimmed.parse().ok()?;
    if !value.is_finite() {
        return None;
    }

    if PLAIN_DECIMAL.is_match(trimmed) && trimmed.len() <= MAX_OPERAND_LEN {
        // Negative zero pastes as plain zero
        let literal = match trimmed.strip_prefix('-') {
            Some(unsigned) if value == 0.0 => unsigned,
            _ => trimmed,
        };
        return Some(strip_leading_zeros(literal));
    }

    Some(format_result(value))
}

/// Drop redundant leading zeros from the integer part ("007" -> "7").
fn strip_leading_zeros(literal: &str) -> String {
    let (sign, digits) = match literal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", literal),
    };

    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() || stripped.starts_with('.') {
        format!("{}0{}", sign, stripped)
    } else {
        format!("{}{}", sign, stripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_numbers_accepted() {
        assert_eq!(parse_pasted("42").as_deref(), Some("42"));
        assert_eq!(parse_pasted("  3.14\n").as_deref(), Some("3.14"));
        assert_eq!(parse_pasted("-12.5").as_deref(), Some("-12.5"));
        assert_eq!(parse_pasted("7.").as_deref(), Some("7."));
    }

    #[test]
    fn test_leading_zeros_stripped() {
        assert_eq!(parse_pasted("007").as_deref(), Some("7"));
        assert_eq!(parse_pasted("000").as_deref(), Some("0"));
        assert_eq!(parse_pasted("00.25").as_deref(), Some("0.25"));
        assert_eq!(parse_pasted("-007").as_deref(), Some("-7"));
    }

    #[test]
    fn test_negative_zero_pasted_as_zero() {
        assert_eq!(parse_pasted("-0").as_deref(), Some("0"));
        assert_eq!(parse_pasted("-00").as_deref(), Some("0"));
        assert_eq!(parse_pasted("-0.0").as_deref(), Some("0.0"));
        assert_eq!(parse_pasted("-0.5").as_deref(), Some("-0.5"));
    }

    #[test]
    fn test_other_numbers_reformatted() {
        assert_eq!(parse_pasted(".5").as_deref(), Some("0.5"));
        assert_eq!(parse_pasted("1e3").as_deref(), Some("1000"));
        assert_eq!(parse_pasted("2.5e20").as_deref(), Some("2.500000e+20"));
        assert_eq!(
            parse_pasted("1234567890123456789").as_deref(),
            Some("1.234568e+18")
        );
    }

    #[test]
    fn test_invalid_input_rejected() {
        assert!(parse_pasted("").is_none());
        assert!(parse_pasted("   ").is_none());
        assert!(parse_pasted("hello").is_none());
        assert!(parse_pasted("12abc").is_none());
        assert!(parse_pasted("1 + 2").is_none());
        assert!(parse_pasted("inf").is_none());
        assert!(parse_pasted("NaN").is_none());
        assert!(parse_pasted("1e999").is_none());
    }
}
