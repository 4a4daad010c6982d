//! Number formatting for the calculator display.
//!
//! Results and operands are squeezed into a display that holds at most
//! [`MAX_OPERAND_LEN`] characters. Anything that does not fit as a plain
//! number falls back to scientific notation.

/// Maximum number of characters in operand text.
pub const MAX_OPERAND_LEN: usize = 15;

/// Strings up to this length are shown on the display as typed.
const MAX_PLAIN_DISPLAY_LEN: usize = 12;

/// Fractional digits used for scientific notation.
const EXPONENTIAL_DIGITS: usize = 6;

/// Significant digits used when a rounded decimal is still too wide.
const FALLBACK_PRECISION: usize = 8;

/// Format a calculation result as operand text.
pub fn format_result(value: f64) -> String {
    if value.fract() == 0.0 {
        let plain = plain_number(value);
        if plain.len() <= MAX_OPERAND_LEN {
            return plain;
        }
    }

    let magnitude = value.abs();
    if magnitude >= 1e15 || (magnitude < 1e-10 && value != 0.0) {
        return to_exponential(value, EXPONENTIAL_DIGITS);
    }

    // Round to 12 decimal places, halves toward positive infinity
    let rounded = (value * 1e12 + 0.5).floor() / 1e12;
    let plain = plain_number(rounded);

    if plain.len() > MAX_OPERAND_LEN {
        return to_precision(value, FALLBACK_PRECISION);
    }

    plain
}

/// Format operand text for the display and the operation indicator.
///
/// Short strings pass through. Longer numeric strings are shown in
/// scientific notation; text that is not a number is left alone.
pub fn format_number(text: &str) -> String {
    if text.chars().count() <= MAX_PLAIN_DISPLAY_LEN {
        return text.to_string();
    }

    match text.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => to_exponential(value, EXPONENTIAL_DIGITS),
        _ => text.to_string(),
    }
}

/// Shortest round-trip decimal rendering, never in exponent form.
fn plain_number(value: f64) -> String {
    if value == 0.0 {
        // Covers negative zero as well
        return "0".to_string();
    }
    format!("{}", value)
}

/// Fractional digits that print any finite `f64` exactly.
const EXACT_DIGITS: usize = 800;

/// The first `count` significant digits of `|value|` and the decimal
/// exponent of the first one.
///
/// Rounding works on the exact decimal expansion and sends halves away
/// from zero, so `1000000500000` to 7 digits is `1000001`.
fn significant_digits(value: f64, count: usize) -> (String, i32) {
    let count = count.max(1);
    let exact = format!("{:.*e}", EXACT_DIGITS, value.abs());
    let (mantissa, exponent) = exact.split_once('e').unwrap_or((exact.as_str(), "0"));
    let mut exponent: i32 = exponent.parse().unwrap_or(0);

    let all: Vec<u8> = mantissa
        .bytes()
        .filter(|b| b.is_ascii_digit())
        .map(|b| b - b'0')
        .collect();
    let mut digits: Vec<u8> = all.iter().copied().take(count).collect();
    digits.resize(count, 0);

    if all.get(count).is_some_and(|&next| next >= 5) {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            // 999.. rolled over to 1000..
            digits.insert(0, 1);
            digits.pop();
            exponent += 1;
        }
    }

    let digits = digits.into_iter().map(|d| char::from(b'0' + d)).collect();
    (digits, exponent)
}

fn sign_prefix(value: f64) -> &'static str {
    if value < 0.0 { "-" } else { "" }
}

/// Scientific notation with a fixed number of fractional digits and an
/// explicitly signed exponent, e.g. `1.234568e+15`.
fn to_exponential(value: f64, digits: usize) -> String {
    let (mantissa, exponent) = significant_digits(value, digits + 1);
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    let (lead, rest) = mantissa.split_at(1);

    if rest.is_empty() {
        format!("{}{}e{}{}", sign_prefix(value), lead, exponent_sign, exponent.abs())
    } else {
        format!(
            "{}{}.{}e{}{}",
            sign_prefix(value),
            lead,
            rest,
            exponent_sign,
            exponent.abs()
        )
    }
}

/// Render `value` with `precision` significant digits.
///
/// Uses fixed notation unless the decimal exponent is below -6 or at least
/// `precision`, in which case scientific notation is used.
fn to_precision(value: f64, precision: usize) -> String {
    let precision = precision.max(1);
    let (digits, exponent) = significant_digits(value, precision);

    if exponent < -6 || exponent >= precision as i32 {
        return to_exponential(value, precision - 1);
    }

    let sign = sign_prefix(value);
    if exponent >= 0 {
        let (int_part, frac_part) = digits.split_at(exponent as usize + 1);
        if frac_part.is_empty() {
            format!("{}{}", sign, int_part)
        } else {
            format!("{}{}.{}", sign, int_part, frac_part)
        }
    } else {
        let zeros = "0".repeat((-exponent - 1) as usize);
        format!("{}0.{}{}", sign, zeros, digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_results() {
        assert_eq!(format_result(12.0), "12");
        assert_eq!(format_result(-42.0), "-42");
        assert_eq!(format_result(0.0), "0");
        assert_eq!(format_result(-0.0), "0");
        assert_eq!(format_result(999_999_999_999_999.0), "999999999999999");
        assert_eq!(format_result(-99_999_999_999_999.0), "-99999999999999");
    }

    #[test]
    fn test_integer_round_trip() {
        for value in [
            1.0,
            -7.0,
            123_456_789.0,
            100_000_000_000_000.0,
            -999_999_999_999.0,
            999_999_999_999_999.0,
        ] {
            let text = format_result(value);
            assert_eq!(text.parse::<f64>().unwrap(), value, "{}", text);
        }
    }

    #[test]
    fn test_large_and_tiny_results_use_exponent() {
        assert_eq!(format_result(1e15), "1.000000e+15");
        assert_eq!(format_result(-2.5e20), "-2.500000e+20");
        assert_eq!(format_result(1e-11), "1.000000e-11");
        assert_eq!(format_result(-3.25e-12), "-3.250000e-12");
    }

    #[test]
    fn test_decimal_rounding() {
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(1.0 / 3.0), "0.333333333333");
        assert_eq!(format_result(2.0 / 3.0), "0.666666666667");
        assert_eq!(format_result(0.75), "0.75");
        assert_eq!(format_result(-1.5), "-1.5");
    }

    #[test]
    fn test_wide_decimal_falls_back_to_precision() {
        assert_eq!(format_result(1_234_567.123456789), "1234567.1");
        assert_eq!(format_result(123_456_789.1234567), "1.2345679e+8");
    }

    #[test]
    fn test_format_number_passthrough() {
        assert_eq!(format_number("0"), "0");
        assert_eq!(format_number("0."), "0.");
        assert_eq!(format_number("123456789012"), "123456789012");
    }

    #[test]
    fn test_format_number_long_operand() {
        assert_eq!(format_number("1234567890123"), "1.234568e+12");
        assert_eq!(format_number("0.000001234567"), "1.234567e-6");
        assert_eq!(format_number("999999999999999"), "1.000000e+15");
    }

    #[test]
    fn test_exponent_ties_round_away_from_zero() {
        assert_eq!(format_number("1000000500000"), "1.000001e+12");
        assert_eq!(format_result(1_000_000_500_000_000.0), "1.000001e+15");
        assert_eq!(format_result(-1_000_000_500_000_000.0), "-1.000001e+15");
        assert_eq!(to_exponential(2.5, 0), "3e+0");
        assert_eq!(to_exponential(-2.5, 0), "-3e+0");
    }

    #[test]
    fn test_exponent_carry() {
        assert_eq!(to_exponential(9_999_999.5, 6), "1.000000e+7");
        assert_eq!(to_exponential(0.0, 6), "0.000000e+0");
    }

    #[test]
    fn test_precision_ties_round_away_from_zero() {
        assert_eq!(to_precision(0.125, 2), "0.13");
        assert_eq!(to_precision(-0.125, 2), "-0.13");
        assert_eq!(to_precision(0.375, 2), "0.38");
        assert_eq!(to_precision(12_345_678.5, 8), "12345679");
        // 2^-24 = 5.9604644775390625e-8
        assert_eq!(to_precision(2f64.powi(-24), 2), "6.0e-8");
    }

    #[test]
    fn test_format_number_keeps_messages() {
        assert_eq!(format_number("Cannot divide by zero"), "Cannot divide by zero");
    }
}
