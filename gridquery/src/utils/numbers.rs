//! Number parsing and display formatting

use rust_decimal::{Decimal, RoundingStrategy};

/// Parse user input as a number.
///
/// Accepts an optional sign, digits with an optional fraction and an
/// optional exponent, surrounded by whitespace. Rejects `inf`, `nan`, hex
/// and anything else `f64::from_str` would accept beyond plain decimals.
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    let mut chars = trimmed.chars().peekable();

    if matches!(chars.peek(), Some('+') | Some('-')) {
        chars.next();
    }

    let mut digits = 0;
    let mut seen_dot = false;
    while let Some(&c) = chars.peek() {
        match c {
            '0'..='9' => digits += 1,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        chars.next();
    }
    if digits == 0 {
        return None;
    }

    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut exponent_digits = 0;
        while chars.peek().is_some_and(char::is_ascii_digit) {
            exponent_digits += 1;
            chars.next();
        }
        if exponent_digits == 0 {
            return None;
        }
    }

    if chars.next().is_some() {
        return None;
    }

    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Format with fixed decimals and custom separators.
///
/// Rounds half away from zero on the decimal value (`1.005` → `1.01`) and
/// groups the integer part in thousands.
pub fn format_number(
    value: f64,
    decimals: usize,
    decimal_point: &str,
    thousands_sep: &str,
) -> String {
    let (negative, formatted) = fixed_decimals(value, decimals);
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push_str(thousands_sep);
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push_str(decimal_point);
        out.push_str(frac_part);
    }
    out
}

/// Sign and unsigned digits of `value` rounded to `decimals` places.
///
/// The float is first cut to 15 significant digits, which drops binary
/// noise such as `1.005` being stored as `1.00499999999999989...`.
fn fixed_decimals(value: f64, decimals: usize) -> (bool, String) {
    let scale = u32::try_from(decimals).unwrap_or(u32::MAX);

    match Decimal::from_scientific(&format!("{:.14e}", value)) {
        Ok(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(scale);
            // no sign on zero, including negative zero
            let negative = rounded.is_sign_negative() && !rounded.is_zero();
            (negative, rounded.abs().to_string())
        }
        // beyond the decimal range
        Err(_) => {
            let rounded = format!("{:.*}", decimals, value.abs());
            let negative = value < 0.0 && rounded.bytes().any(|b| b.is_ascii_digit() && b != b'0');
            (negative, rounded)
        }
    }
}

/// Two decimals, `,` as decimal separator, `.` for thousands
pub fn format_float(value: f64) -> String {
    format_number(value, 2, ",", ".")
}

/// Shortest plain rendering: `60` for whole numbers, `12.5` otherwise
pub fn format_plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_decimals() {
        assert_eq!(parse_numeric("30"), Some(30.0));
        assert_eq!(parse_numeric(" -1.5 "), Some(-1.5));
        assert_eq!(parse_numeric("+.5"), Some(0.5));
        assert_eq!(parse_numeric("5."), Some(5.0));
        assert_eq!(parse_numeric("1e3"), Some(1000.0));
        assert_eq!(parse_numeric("2.5E-1"), Some(0.25));
    }

    #[test]
    fn test_rejects_non_numeric() {
        let inputs = [
            "", " ", "Bob", "inf", "NaN", "0x1A", "1e", "1.2.3", ".", "-", "12abc", "1,5",
        ];
        for input in inputs {
            assert_eq!(parse_numeric(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_formats_float_with_european_separators() {
        assert_eq!(format_float(60.0), "60,00");
        assert_eq!(format_float(1234567.891), "1.234.567,89");
        assert_eq!(format_float(-1234.5), "-1.234,50");
        assert_eq!(format_float(0.005), "0,01");
        assert_eq!(format_float(-0.001), "0,00");
        assert_eq!(format_float(999.999), "1.000,00");
    }

    #[test]
    fn test_format_float_rounds_half_cents_up() {
        assert_eq!(format_float(1.005), "1,01");
        assert_eq!(format_float(1.015), "1,02");
        assert_eq!(format_float(2.675), "2,68");
        assert_eq!(format_float(-1.005), "-1,01");
        assert_eq!(format_float(0.1 + 0.2), "0,30");
    }

    #[test]
    fn test_format_number_outside_decimal_range() {
        assert_eq!(format_number(1e30, 0, ",", "."), "1.000.000.000.000.000.019.884.624.838.656");
    }

    #[test]
    fn test_formats_without_decimals() {
        assert_eq!(format_number(1234.4, 0, ",", "."), "1.234");
        assert_eq!(format_number(100.0, 0, ".", ","), "100");
    }

    #[test]
    fn test_plain_rendering() {
        assert_eq!(format_plain(60.0), "60");
        assert_eq!(format_plain(12.5), "12.5");
        assert_eq!(format_plain(-3.0), "-3");
    }
}
