use crate::amortization::schedule::{AmortizationItem, SimulationResult};
use crate::core::money::{round2, CENT_SCALE};
use crate::core::product::LoanProduct;
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use thiserror::Error;

/// Reasons a simulation is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulationError {
    #[error("term must be at least one month, got {0}")]
    InvalidTerm(u32),
    #[error("principal must be positive, got {0}")]
    InvalidAmount(Decimal),
    #[error("annual rate must not be negative, got {0}")]
    InvalidRate(Decimal),
    #[error("installment is not representable for monthly rate {monthly_rate} over {term_months} months")]
    Overflow {
        monthly_rate: Decimal,
        term_months: u32,
    },
}

/// Fixed-installment (Price table) amortization.
///
/// Every monetary value is rounded to cents right after it is computed,
/// and the rounded value is what the next step consumes:
///
/// 1. `i = annual_rate / 12` (nominal, no compounding conversion).
/// 2. `installment = round2(amount * i(1+i)^n / ((1+i)^n - 1))`, or
///    `round2(amount / n)` when `i` is zero.
/// 3. For each month: `interest = round2(balance * i)`,
///    `principal = round2(installment - interest)`,
///    `balance = round2(balance - principal)`.
/// 4. `total_interest = round2(sum of interest)`,
///    `total_paid = round2(installment * n)`.
///
/// A negative balance is reported as zero, and the last month always
/// reports a zero balance; any sub-installment residue left by rounding
/// shows up in [`SimulationResult::rounding_drift`] instead.
pub struct AmortizationEngine;

impl AmortizationEngine {
    /// Simulate `amount` borrowed under `product` over `term_months`.
    ///
    /// The product's term and amount caps are not checked here; see
    /// [`ProductRegistry::simulate`](crate::registry::catalogue::ProductRegistry::simulate).
    ///
    /// # Examples
    ///
    /// ```
    /// use loan_simulator::amortization::engine::AmortizationEngine;
    /// use loan_simulator::core::product::LoanProduct;
    /// use rust_decimal::Decimal;
    /// use rust_decimal_macros::dec;
    ///
    /// let product = LoanProduct::new("p0", "Zero", Decimal::ZERO, 6);
    /// let result = AmortizationEngine::simulate(&product, dec!(6000), 6).unwrap();
    ///
    /// assert_eq!(result.installment(), dec!(1000.00));
    /// assert_eq!(result.total_interest(), Decimal::ZERO);
    /// assert_eq!(result.total_paid(), dec!(6000.00));
    /// ```
    pub fn simulate(
        product: &LoanProduct,
        amount: Decimal,
        term_months: u32,
    ) -> Result<SimulationResult, SimulationError> {
        validate(product, amount, term_months)?;

        let monthly_rate = product.monthly_rate();
        let installment = Self::installment(monthly_rate, amount, term_months)?;
        let overflow = || SimulationError::Overflow {
            monthly_rate,
            term_months,
        };

        let mut schedule = Vec::with_capacity(term_months as usize);
        let mut balance = amount;
        let mut total_interest = Decimal::ZERO;

        for month in 1..=term_months {
            let interest = round2(balance.checked_mul(monthly_rate).ok_or_else(overflow)?);
            let principal = round2(installment.checked_sub(interest).ok_or_else(overflow)?);
            balance = round2(balance.checked_sub(principal).ok_or_else(overflow)?);
            total_interest = total_interest.checked_add(interest).ok_or_else(overflow)?;

            let reported = if month == term_months || balance < Decimal::ZERO {
                Decimal::new(0, CENT_SCALE)
            } else {
                balance
            };

            schedule.push(AmortizationItem {
                month,
                interest,
                principal,
                installment,
                balance: reported,
            });
        }

        let total_paid = round2(
            installment
                .checked_mul(Decimal::from(term_months))
                .ok_or_else(overflow)?,
        );

        debug!(
            "simulated {} over {} months on {}: installment {}, residual {}",
            amount,
            term_months,
            product.id(),
            installment,
            balance
        );

        Ok(SimulationResult::new(
            product.clone(),
            amount,
            term_months,
            monthly_rate,
            installment,
            schedule,
            round2(total_interest),
            total_paid,
        ))
    }

    /// The rounded fixed installment for `amount` at `monthly_rate` over
    /// `term_months`. Inputs are assumed valid.
    pub fn installment(
        monthly_rate: Decimal,
        amount: Decimal,
        term_months: u32,
    ) -> Result<Decimal, SimulationError> {
        let overflow = || SimulationError::Overflow {
            monthly_rate,
            term_months,
        };

        if monthly_rate.is_zero() {
            return Ok(round2(amount / Decimal::from(term_months)));
        }

        let growth = (Decimal::ONE + monthly_rate)
            .checked_powu(u64::from(term_months))
            .ok_or_else(overflow)?;
        let factor = monthly_rate.checked_mul(growth).ok_or_else(overflow)?;
        let raw = amount
            .checked_mul(factor)
            .and_then(|numerator| numerator.checked_div(growth - Decimal::ONE))
            .ok_or_else(overflow)?;

        Ok(round2(raw))
    }
}

fn validate(
    product: &LoanProduct,
    amount: Decimal,
    term_months: u32,
) -> Result<(), SimulationError> {
    if term_months < 1 {
        return Err(SimulationError::InvalidTerm(term_months));
    }
    if amount <= Decimal::ZERO {
        return Err(SimulationError::InvalidAmount(amount));
    }
    if product.annual_rate() < Decimal::ZERO {
        return Err(SimulationError::InvalidRate(product.annual_rate()));
    }
    Ok(())
}
