//! Display formatting for money and percentages.
//!
//! Keystone has a single display format: euro amounts in Portuguese
//! notation (`12 345,67 €`). Space grouping only kicks in from five integer
//! digits, so `1234,56 €` stays ungrouped.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{KeystoneError, KeystoneResult};

/// Currency symbol appended to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "€";

/// Formats an amount with two decimals, grouping and the euro symbol.
///
/// ```
/// use keystone_core::format::format_currency;
///
/// assert_eq!(format_currency(421.6), "421,60 €");
/// assert_eq!(format_currency(120_000.0), "120 000,00 €");
/// assert_eq!(format_currency(-1_234.565), "-1234,57 €");
/// ```
#[must_use]
pub fn format_currency(value: f64) -> String {
    format!("{} {CURRENCY_SYMBOL}", format_number(value))
}

/// Formats a number with two decimals and grouping, without a symbol.
#[must_use]
pub fn format_number(value: f64) -> String {
    let Some(rounded) = round_cents(value) else {
        return "n/a".to_string();
    };

    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{},{frac_part}", group_thousands(int_part))
}

/// Formats a percentage with two decimals (`12.50%`).
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Parses a currency string typed by a user.
///
/// Everything except digits, `.` and `,` is discarded; of the remaining
/// separators only the last one is kept and read as the decimal point. So
/// `"120.000,50 €"`, `"120,000.50"` and `"120000,5"` all parse.
///
/// ```
/// use keystone_core::format::parse_currency;
///
/// assert_eq!(parse_currency("120.000,50 €").unwrap(), 120_000.5);
/// assert_eq!(parse_currency("1,234,567").unwrap(), 1_234.567);
/// ```
pub fn parse_currency(input: &str) -> KeystoneResult<f64> {
    let kept: Vec<char> = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();

    let last_separator = kept.iter().rposition(|c| *c == '.' || *c == ',');
    let cleaned: String = kept
        .iter()
        .enumerate()
        .filter_map(|(i, c)| match c {
            '.' | ',' if Some(i) == last_separator => Some('.'),
            '.' | ',' => None,
            digit => Some(*digit),
        })
        .collect();

    if !cleaned.chars().any(|c| c.is_ascii_digit()) {
        return Err(KeystoneError::CurrencyParse {
            input: input.to_string(),
        });
    }

    cleaned
        .parse::<f64>()
        .map_err(|_| KeystoneError::CurrencyParse {
            input: input.to_string(),
        })
}

fn round_cents(value: f64) -> Option<Decimal> {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

fn group_thousands(digits: &str) -> String {
    if digits.len() < 5 {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0), "0,00");
        assert_eq!(format_number(999.999), "1000,00");
        assert_eq!(format_number(9_999.0), "9999,00");
        assert_eq!(format_number(10_000.0), "10 000,00");
        assert_eq!(format_number(1_234_567.891), "1 234 567,89");
    }

    #[test]
    fn test_format_rounding_midpoint() {
        assert_eq!(round_cents(2.675), Some(dec!(2.68)));
        assert!(round_cents(-0.004).is_some_and(|d| d.is_zero()));
        assert_eq!(format_number(-0.004), "0,00");
        assert_eq!(format_currency(0.125), "0,13 €");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_number(f64::NAN), "n/a");
        assert_eq!(format_currency(f64::INFINITY), "n/a €");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.8333333), "0.83%");
        assert_eq!(format_percent(20.0), "20.00%");
    }

    #[test]
    fn test_parse_currency() {
        assert_eq!(parse_currency("75000").unwrap(), 75_000.0);
        assert_eq!(parse_currency("€ 75 000,00").unwrap(), 75_000.0);
        assert_eq!(parse_currency("1.234.567,89").unwrap(), 1_234_567.89);
        assert_eq!(parse_currency(",5").unwrap(), 0.5);
        assert!(parse_currency("").is_err());
        assert!(parse_currency("abc").is_err());
        assert!(parse_currency(",").is_err());
    }

    #[test]
    fn test_parse_roundtrips_formatted_output() {
        for value in [0.0, 12.5, 1_234.56, 98_765.43, 1_000_000.0] {
            let parsed = parse_currency(&format_currency(value)).unwrap();
            assert!((parsed - value).abs() < 1e-9, "{value} -> {parsed}");
        }
    }
}
