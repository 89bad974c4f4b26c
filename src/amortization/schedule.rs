use crate::core::format::{currency_brl, percent};
use crate::core::product::LoanProduct;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One month of a Price-table schedule.
///
/// `installment` is the same in every row of a run and always equals
/// `interest + principal`. `balance` is what remains owed after this
/// month's payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationItem {
    /// 1-based month number.
    pub month: u32,
    pub interest: Decimal,
    /// Amortized portion of the principal.
    pub principal: Decimal,
    pub installment: Decimal,
    pub balance: Decimal,
}

/// Outcome of a single simulation.
///
/// Built fresh per call and owned by the caller. Carries a copy of the
/// product it was computed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    product: LoanProduct,
    amount: Decimal,
    term_months: u32,
    monthly_rate: Decimal,
    installment: Decimal,
    schedule: Vec<AmortizationItem>,
    total_interest: Decimal,
    total_paid: Decimal,
}

impl SimulationResult {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        product: LoanProduct,
        amount: Decimal,
        term_months: u32,
        monthly_rate: Decimal,
        installment: Decimal,
        schedule: Vec<AmortizationItem>,
        total_interest: Decimal,
        total_paid: Decimal,
    ) -> Self {
        Self {
            product,
            amount,
            term_months,
            monthly_rate,
            installment,
            schedule,
            total_interest,
            total_paid,
        }
    }

    /// The product this simulation was computed for.
    pub fn product(&self) -> &LoanProduct {
        &self.product
    }

    /// Requested principal.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn term_months(&self) -> u32 {
        self.term_months
    }

    /// Nominal monthly rate (`annual_rate / 12`), unrounded.
    pub fn monthly_rate(&self) -> Decimal {
        self.monthly_rate
    }

    /// Fixed monthly installment, rounded to cents.
    pub fn installment(&self) -> Decimal {
        self.installment
    }

    /// Month-by-month breakdown, ordered by month.
    pub fn schedule(&self) -> &[AmortizationItem] {
        &self.schedule
    }

    /// Sum of every month's interest.
    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    /// `installment * term_months`.
    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    /// Sum of the amortized principal across the schedule.
    ///
    /// Close to, but not always equal to, [`amount`](Self::amount): each
    /// row is rounded on its own, so a few cents of drift is expected.
    pub fn principal_paid(&self) -> Decimal {
        self.schedule.iter().map(|row| row.principal).sum()
    }

    /// Difference between the requested principal and what the schedule
    /// amortizes. Positive when the schedule falls short.
    pub fn rounding_drift(&self) -> Decimal {
        self.amount - self.principal_paid()
    }
}

impl std::fmt::Display for SimulationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Price Table Simulation ===")?;
        writeln!(
            f,
            "Product:        {} ({})",
            self.product.name(),
            self.product.id()
        )?;
        writeln!(f, "Amount:         {}", currency_brl(self.amount))?;
        writeln!(f, "Term:           {} months", self.term_months)?;
        writeln!(
            f,
            "Rate:           {} a.a. / {} a.m.",
            percent(self.product.annual_rate()),
            percent(self.monthly_rate)
        )?;
        writeln!(f, "Installment:    {}", currency_brl(self.installment))?;
        writeln!(f, "Total Interest: {}", currency_brl(self.total_interest))?;
        writeln!(f, "Total Paid:     {}", currency_brl(self.total_paid))?;

        writeln!(f, "\nSchedule:")?;
        writeln!(
            f,
            "  {:>5}  {:>16}  {:>16}  {:>16}  {:>16}",
            "Month", "Interest", "Principal", "Installment", "Balance"
        )?;
        for row in &self.schedule {
            writeln!(
                f,
                "  {:>5}  {:>16}  {:>16}  {:>16}  {:>16}",
                row.month,
                currency_brl(row.interest),
                currency_brl(row.principal),
                currency_brl(row.installment),
                currency_brl(row.balance)
            )?;
        }
        Ok(())
    }
}
