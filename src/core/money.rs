use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of decimal places every monetary value is kept at.
pub const CENT_SCALE: u32 = 2;

/// Errors arising when bringing external numbers into the decimal domain.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("value must be finite, got {0}")]
    NonFinite(String),
    #[error("value {0} is outside the representable decimal range")]
    OutOfRange(String),
    #[error("invalid decimal '{input}': {reason}")]
    Parse { input: String, reason: String },
}

/// Round to cents, half away from zero.
///
/// This is the single rounding rule of the crate: installments, interest,
/// amortized principal, balances and totals all go through it right after
/// they are computed.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::money::round2;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round2(dec!(2.345)), dec!(2.35));
/// assert_eq!(round2(dec!(-2.345)), dec!(-2.35));
/// assert_eq!(round2(dec!(945.6012)), dec!(945.60));
/// ```
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded =
        value.round_dp_with_strategy(CENT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    // Pad so 1000 renders as "1000.00" wherever it is serialized.
    rounded.rescale(CENT_SCALE);
    rounded
}

/// True when `value` carries no sub-cent residue.
pub fn is_cent_exact(value: Decimal) -> bool {
    round2(value) == value
}

/// Convert a binary float into a decimal, rejecting NaN and infinities.
pub fn decimal_from_f64(value: f64) -> Result<Decimal, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::NonFinite(value.to_string()));
    }
    Decimal::from_f64(value).ok_or_else(|| MoneyError::OutOfRange(value.to_string()))
}

/// Parse a plain decimal string such as `"12345.67"`.
///
/// No masking or locale handling: thousands separators and currency
/// symbols are rejected.
pub fn parse_decimal(input: &str) -> Result<Decimal, MoneyError> {
    input.trim().parse::<Decimal>().map_err(|e| MoneyError::Parse {
        input: input.to_string(),
        reason: e.to_string(),
    })
}
