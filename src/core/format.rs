//! pt-BR rendering of currency amounts and rates for reports and the CLI.
//!
//! Formatting is presentation only; nothing here feeds back into the
//! amortization arithmetic.

use crate::core::money::{decimal_from_f64, round2};
use rust_decimal::Decimal;

const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Render an amount as Brazilian reais, e.g. `R$ 1.234,56`.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::format::currency_brl;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(currency_brl(dec!(1234.5)), "R$ 1.234,50");
/// assert_eq!(currency_brl(dec!(-0.5)), "-R$ 0,50");
/// ```
pub fn currency_brl(value: Decimal) -> String {
    let rounded = round2(value);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    format!("{}R$ {}", sign, localize(&digits))
}

/// Like [`currency_brl`], but for binary floats; NaN and infinities render as `-`.
pub fn currency_brl_f64(value: f64) -> String {
    decimal_from_f64(value)
        .map(currency_brl)
        .unwrap_or_else(|_| "-".to_string())
}

/// Render a decimal fraction as a percentage with at most two decimals,
/// e.g. `0.348` becomes `34,8%`. Rates too large to scale render as `-`.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::format::percent;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(percent(dec!(0.24)), "24%");
/// assert_eq!(percent(dec!(0.02)), "2%");
/// assert_eq!(percent(dec!(0.029)), "2,9%");
/// ```
pub fn percent(value: Decimal) -> String {
    let pct = match value.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => round2(scaled).normalize(),
        None => return "-".to_string(),
    };
    let sign = if pct.is_sign_negative() && !pct.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{}{}%", sign, localize(&pct.abs().to_string()))
}

/// Like [`percent`], but for binary floats; NaN and infinities render as `-`.
pub fn percent_f64(value: f64) -> String {
    decimal_from_f64(value)
        .map(percent)
        .unwrap_or_else(|_| "-".to_string())
}

/// Swap `1234.56` into `1.234,56`. Expects an unsigned plain decimal string.
fn localize(plain: &str) -> String {
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (idx, ch) in int_part.chars().enumerate() {
        if idx > 0 && (int_part.len() - idx) % 3 == 0 {
            grouped.push(THOUSANDS_SEPARATOR);
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, DECIMAL_SEPARATOR, frac),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_currency_grouping() {
        assert_eq!(currency_brl(dec!(0)), "R$ 0,00");
        assert_eq!(currency_brl(dec!(999.999)), "R$ 1.000,00");
        assert_eq!(currency_brl(dec!(1000000)), "R$ 1.000.000,00");
        assert_eq!(currency_brl(dec!(12345.67)), "R$ 12.345,67");
    }

    #[test]
    fn test_currency_negative_zero_has_no_sign() {
        assert_eq!(currency_brl(dec!(-0.001)), "R$ 0,00");
    }

    #[test]
    fn test_percent() {
        assert_eq!(percent(dec!(0.348)), "34,8%");
        assert_eq!(percent(dec!(0.216)), "21,6%");
        assert_eq!(percent(dec!(0.123456)), "12,35%");
        assert_eq!(percent(dec!(12.5)), "1.250%");
        assert_eq!(percent(Decimal::ZERO), "0%");
    }

    #[test]
    fn test_percent_out_of_range_renders_dash() {
        assert_eq!(percent(Decimal::MAX), "-");
        assert_eq!(percent(Decimal::MIN), "-");
    }

    #[test]
    fn test_non_finite_renders_dash() {
        assert_eq!(currency_brl_f64(f64::NAN), "-");
        assert_eq!(percent_f64(f64::NEG_INFINITY), "-");
        assert_eq!(currency_brl_f64(6000.0), "R$ 6.000,00");
        assert_eq!(percent_f64(0.24), "24%");
    }
}
