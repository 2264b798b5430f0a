//! Locale-formatted number parsing and display.
//!
//! Amounts are written with "." as the thousands separator and "," as the
//! decimal separator (`9.000,00`). Ratios are written either as a percentage
//! (`10%`) or as an already-normalized fraction (`0,10`).

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::round_dp;
use crate::models::Currency;

/// Decimal places shown for currency amounts.
pub const CURRENCY_DP: u32 = 2;
/// Decimal places shown for ratios (`0,1500`).
pub const RATIO_DP: u32 = 4;
/// Decimal places shown for percentages (`15,00`).
pub const PERCENTAGE_DP: u32 = 2;

static CURRENCY_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[RGU]\$|\$)\s*").expect("currency prefix pattern is valid")
});

/// Error returned when a token does not resolve to a finite number.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("value is empty")]
    Empty,

    #[error("'{input}' is not a number")]
    NotANumber { input: String },
}

fn parse_normalized(
    original: &str,
    normalized: &str,
) -> Result<Decimal, ParseError> {
    Decimal::from_str(normalized).map_err(|e| {
        warn!(input = %original, "invalid number: {}", e);
        ParseError::NotANumber {
            input: original.to_string(),
        }
    })
}

/// Parses a currency amount such as `9.000,00`.
///
/// Every "." is treated as a thousands separator and "," as the decimal
/// separator. A leading currency symbol (`R$`, `G$`, `U$`, `$`) is ignored.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::locale::parse_currency;
///
/// assert_eq!(parse_currency("9.000,00").unwrap(), dec!(9000.00));
/// assert_eq!(parse_currency("R$ 1.234,5").unwrap(), dec!(1234.5));
/// assert!(parse_currency("abc").is_err());
/// ```
pub fn parse_currency(s: &str) -> Result<Decimal, ParseError> {
    let trimmed = strip_currency_symbol(s);
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let normalized = trimmed.replace('.', "").replace(',', ".");
    parse_normalized(s, &normalized)
}

/// Trims `s` and drops a leading currency symbol: `" R$ 9.000,00"` becomes `"9.000,00"`.
pub fn strip_currency_symbol(s: &str) -> &str {
    let trimmed = s.trim();
    match CURRENCY_PREFIX.find(trimmed) {
        Some(prefix) => &trimmed[prefix.end()..],
        None => trimmed,
    }
}

/// Parses a ratio written as a percentage (`10%`) or a fraction (`0,10`).
///
/// Percentages are divided by 100; fractions are taken as-is. Range checks
/// are left to the caller.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use pricing_core::locale::parse_ratio;
///
/// assert_eq!(parse_ratio("10%").unwrap(), dec!(0.10));
/// assert_eq!(parse_ratio("0,10").unwrap(), dec!(0.10));
/// assert_eq!(parse_ratio("12,5 %").unwrap(), dec!(0.125));
/// ```
pub fn parse_ratio(s: &str) -> Result<Decimal, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }

    match trimmed.strip_suffix('%') {
        Some(percent) => {
            let normalized = percent.trim().replace(',', ".");
            if normalized.is_empty() {
                return Err(ParseError::NotANumber {
                    input: s.to_string(),
                });
            }
            Ok(parse_normalized(s, &normalized)? / Decimal::ONE_HUNDRED)
        }
        None => parse_normalized(s, &trimmed.replace(',', ".")),
    }
}

/// Formats `value` with `dp` decimals, "." grouping and "," as decimal separator.
pub fn format_grouped(
    value: Decimal,
    dp: u32,
) -> String {
    let mut rounded = round_dp(value, dp);
    if rounded.is_zero() {
        rounded.set_sign_positive(true);
    }

    let plain = rounded.abs().to_string();
    let (integer, fraction) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };
    group_digits(rounded.is_sign_negative(), integer, fraction)
}

fn group_digits(
    negative: bool,
    integer: &str,
    fraction: Option<&str>,
) -> String {
    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3 + 8);
    if negative {
        grouped.push('-');
    }
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }
    if let Some(fraction) = fraction {
        grouped.push(',');
        grouped.push_str(fraction);
    }
    grouped
}

/// Formats a currency amount: `18666.666` becomes `18.666,67`.
pub fn format_currency(value: Decimal) -> String {
    format_grouped(value, CURRENCY_DP)
}

/// Formats a ratio with four decimals: `0.1` becomes `0,1000`.
pub fn format_ratio(value: Decimal) -> String {
    format_grouped(value, RATIO_DP)
}

/// Formats a ratio as a percentage number without the sign: `0.2` becomes `20,00`.
pub fn format_percentage(value: Decimal) -> String {
    match value.checked_mul(Decimal::ONE_HUNDRED) {
        Some(percent) => format_grouped(percent, PERCENTAGE_DP),
        None => {
            // Past the Decimal range once scaled: shift the whole digits instead
            let whole = value.round();
            let digits = format!("{}00", whole.abs());
            group_digits(whole.is_sign_negative(), &digits, Some("00"))
        }
    }
}

/// Formats a currency amount with its symbol: `R$ 18.666,67`.
pub fn format_money(
    currency: Currency,
    value: Decimal,
) -> String {
    format!("{} {}", currency.symbol(), format_currency(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // parse_currency tests
    // =========================================================================

    #[test]
    fn parse_currency_strips_thousands_separator() {
        assert_eq!(parse_currency("9.000,00").unwrap(), dec!(9000.00));
        assert_eq!(parse_currency("1.234.567,89").unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_currency_without_separators() {
        assert_eq!(parse_currency("5000").unwrap(), dec!(5000));
        assert_eq!(parse_currency("20000,5").unwrap(), dec!(20000.5));
    }

    #[test]
    fn parse_currency_trims_whitespace_and_symbol() {
        assert_eq!(parse_currency("  R$ 9.000,00 ").unwrap(), dec!(9000));
        assert_eq!(parse_currency("U$12,00").unwrap(), dec!(12));
        assert_eq!(parse_currency("$ 3,50").unwrap(), dec!(3.5));
    }

    #[test]
    fn parse_currency_empty_is_error() {
        assert_eq!(parse_currency(""), Err(ParseError::Empty));
        assert_eq!(parse_currency("   "), Err(ParseError::Empty));
        assert_eq!(parse_currency("R$ "), Err(ParseError::Empty));
    }

    #[test]
    fn parse_currency_rejects_text() {
        assert_eq!(
            parse_currency("nove mil"),
            Err(ParseError::NotANumber {
                input: "nove mil".to_string()
            })
        );
    }

    #[test]
    fn parse_currency_rejects_two_decimal_separators() {
        assert!(parse_currency("1,000,00").is_err());
    }

    // =========================================================================
    // parse_ratio tests
    // =========================================================================

    #[test]
    fn parse_ratio_percentage() {
        assert_eq!(parse_ratio("10%").unwrap(), dec!(0.10));
        assert_eq!(parse_ratio("100%").unwrap(), dec!(1));
        assert_eq!(parse_ratio("0%").unwrap(), dec!(0));
    }

    #[test]
    fn parse_ratio_percentage_with_decimal_comma() {
        assert_eq!(parse_ratio("12,5%").unwrap(), dec!(0.125));
    }

    #[test]
    fn parse_ratio_fraction() {
        assert_eq!(parse_ratio("0,10").unwrap(), dec!(0.10));
        assert_eq!(parse_ratio("0.15").unwrap(), dec!(0.15));
    }

    #[test]
    fn parse_ratio_bare_number_is_not_scaled() {
        assert_eq!(parse_ratio("15").unwrap(), dec!(15));
    }

    #[test]
    fn parse_ratio_lone_percent_sign_is_error() {
        assert!(matches!(
            parse_ratio("%"),
            Err(ParseError::NotANumber { .. })
        ));
    }

    #[test]
    fn parse_ratio_rejects_text() {
        assert!(parse_ratio("dez%").is_err());
        assert_eq!(parse_ratio(""), Err(ParseError::Empty));
    }

    // =========================================================================
    // formatting tests
    // =========================================================================

    #[test]
    fn format_currency_groups_thousands() {
        assert_eq!(format_currency(dec!(18666.666666)), "18.666,67");
        assert_eq!(format_currency(dec!(1234567.891)), "1.234.567,89");
        assert_eq!(format_currency(dec!(999.999)), "1.000,00");
    }

    #[test]
    fn format_currency_small_values() {
        assert_eq!(format_currency(dec!(0)), "0,00");
        assert_eq!(format_currency(dec!(7.5)), "7,50");
        assert_eq!(format_currency(dec!(100)), "100,00");
    }

    #[test]
    fn format_currency_negative_values() {
        assert_eq!(format_currency(dec!(-5000)), "-5.000,00");
        assert_eq!(format_currency(dec!(-0.001)), "0,00");
    }

    #[test]
    fn format_ratio_four_decimals() {
        assert_eq!(format_ratio(dec!(0.1)), "0,1000");
        assert_eq!(format_ratio(dec!(0.75)), "0,7500");
        assert_eq!(format_ratio(dec!(0.123456)), "0,1235");
    }

    #[test]
    fn format_percentage_two_decimals() {
        assert_eq!(format_percentage(dec!(0.2)), "20,00");
        assert_eq!(format_percentage(dec!(0.155)), "15,50");
        assert_eq!(format_percentage(dec!(-0.5)), "-50,00");
    }

    #[test]
    fn format_percentage_past_decimal_range() {
        assert_eq!(
            format_percentage(Decimal::MAX),
            "7.922.816.251.426.433.759.354.395.033.500,00"
        );
        assert_eq!(
            format_percentage(Decimal::MIN),
            "-7.922.816.251.426.433.759.354.395.033.500,00"
        );
    }

    #[test]
    fn strip_currency_symbol_keeps_the_amount() {
        assert_eq!(strip_currency_symbol(" R$ 9.000,00 "), "9.000,00");
        assert_eq!(strip_currency_symbol("G$1.200"), "1.200");
        assert_eq!(strip_currency_symbol("5.000,00"), "5.000,00");
    }

    #[test]
    fn format_money_prefixes_symbol() {
        assert_eq!(
            format_money(Currency::Guarani, dec!(4000)),
            "G$ 4.000,00"
        );
    }
}
