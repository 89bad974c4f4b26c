use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Months in a year; the nominal monthly rate is `annual_rate / MONTHS_PER_YEAR`.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Unique identifier for a loan product in the catalogue.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::product::ProductId;
///
/// let personal = ProductId::new("cx-1");
/// let payroll = ProductId::new("cx-2");
/// assert_ne!(personal, payroll);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A loan product offered to borrowers.
///
/// `annual_rate` is a decimal fraction (`0.24` means 24% a year).
/// `max_term_months` and `max_amount` are caps a caller checks before
/// simulating; the amortization engine itself never looks at them.
///
/// Products are immutable once created.
///
/// # Examples
///
/// ```
/// use loan_simulator::core::product::LoanProduct;
/// use rust_decimal_macros::dec;
///
/// let product = LoanProduct::new("p1", "Personal", dec!(0.24), 12)
///     .with_max_amount(dec!(20_000));
///
/// assert_eq!(product.monthly_rate(), dec!(0.02));
/// assert_eq!(product.max_amount(), Some(dec!(20_000)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanProduct {
    id: ProductId,
    name: String,
    annual_rate: Decimal,
    max_term_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_amount: Option<Decimal>,
}

impl LoanProduct {
    /// Create a product. Values are taken as given; the registry validates
    /// user-supplied products and the engine validates the rate it uses.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        annual_rate: Decimal,
        max_term_months: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            annual_rate,
            max_term_months,
            max_amount: None,
        }
    }

    /// Set the largest principal this product lends.
    pub fn with_max_amount(mut self, max_amount: Decimal) -> Self {
        self.max_amount = Some(max_amount);
        self
    }

    // --- Accessors ---

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    pub fn max_term_months(&self) -> u32 {
        self.max_term_months
    }

    pub fn max_amount(&self) -> Option<Decimal> {
        self.max_amount
    }

    /// Nominal monthly rate: a plain division by twelve, not the
    /// compounding-equivalent rate. 24% a year is exactly 2% a month.
    pub fn monthly_rate(&self) -> Decimal {
        self.annual_rate / Decimal::from(MONTHS_PER_YEAR)
    }
}

/// A borrower's request: which product, how much, over how many months.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub product_id: ProductId,
    /// Principal in currency units.
    pub amount: Decimal,
    pub term_months: u32,
}

impl SimulationRequest {
    pub fn new(product_id: impl Into<ProductId>, amount: Decimal, term_months: u32) -> Self {
        Self {
            product_id: product_id.into(),
            amount,
            term_months,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_product_id_display() {
        let id = ProductId::new("custom-1000");
        assert_eq!(format!("{}", id), "custom-1000");
    }

    #[test]
    fn test_monthly_rate_is_nominal() {
        let product = LoanProduct::new("p1", "Teste", dec!(0.24), 12);
        assert_eq!(product.monthly_rate(), dec!(0.02));

        let product = LoanProduct::new("p2", "Teste", dec!(0.348), 24);
        assert_eq!(product.monthly_rate(), dec!(0.029));
    }

    #[test]
    fn test_zero_rate_product() {
        let product = LoanProduct::new("p0", "Sem juros", Decimal::ZERO, 6);
        assert!(product.monthly_rate().is_zero());
        assert_eq!(product.max_amount(), None);
    }

    #[test]
    fn test_product_serializes_rates_as_strings() {
        let product = LoanProduct::new("cx-1", "Crédito Pessoal", dec!(0.348), 24)
            .with_max_amount(dec!(20000));
        let json: serde_json::Value = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "cx-1");
        assert_eq!(json["annual_rate"], "0.348");
        assert_eq!(json["max_term_months"], 24);
        assert_eq!(json["max_amount"], "20000");
    }

    #[test]
    fn test_product_without_cap_omits_max_amount() {
        let product = LoanProduct::new("p1", "Teste", dec!(0.24), 12);
        let json: serde_json::Value = serde_json::to_value(&product).unwrap();
        assert!(json.get("max_amount").is_none());
    }
}
