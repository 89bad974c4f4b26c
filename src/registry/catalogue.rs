use crate::amortization::engine::{AmortizationEngine, SimulationError};
use crate::amortization::schedule::SimulationResult;
use crate::core::product::{LoanProduct, ProductId, SimulationRequest};
use crate::registry::ids::{IdGenerator, SequentialIds};
use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors arising from catalogue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("product name must not be blank")]
    EmptyName,
    #[error("annual rate must not be negative, got {0}")]
    InvalidRate(Decimal),
    #[error("maximum term must be at least one month")]
    InvalidMaxTerm,
    #[error("maximum amount must be positive, got {0}")]
    InvalidMaxAmount(Decimal),
    #[error("a product with id {0} already exists")]
    DuplicateId(ProductId),
    #[error("no product with id {0}")]
    ProductNotFound(ProductId),
    #[error("term of {requested} months exceeds the {max} months allowed by {product}")]
    TermExceedsMax {
        product: ProductId,
        requested: u32,
        max: u32,
    },
    #[error("amount {requested} exceeds the {max} allowed by {product}")]
    AmountExceedsMax {
        product: ProductId,
        requested: Decimal,
        max: Decimal,
    },
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Fields a caller supplies to create a product; the id is allocated by
/// the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLoanProduct {
    pub name: String,
    pub annual_rate: Decimal,
    pub max_term_months: u32,
    #[serde(default)]
    pub max_amount: Option<Decimal>,
}

impl NewLoanProduct {
    fn validate(&self) -> Result<(), RegistryError> {
        if self.name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.annual_rate < Decimal::ZERO {
            return Err(RegistryError::InvalidRate(self.annual_rate));
        }
        if self.max_term_months < 1 {
            return Err(RegistryError::InvalidMaxTerm);
        }
        if let Some(max) = self.max_amount {
            if max <= Decimal::ZERO {
                return Err(RegistryError::InvalidMaxAmount(max));
            }
        }
        Ok(())
    }
}

/// In-memory, append-only catalogue of loan products.
///
/// Products are never mutated or removed. Listing is newest first, with
/// the seed catalogue (if any) after every product created at runtime.
///
/// # Examples
///
/// ```
/// use loan_simulator::registry::catalogue::{NewLoanProduct, ProductRegistry};
/// use loan_simulator::registry::ids::SequentialIds;
/// use rust_decimal_macros::dec;
///
/// let mut registry = ProductRegistry::new(SequentialIds::default());
/// let created = registry
///     .create(NewLoanProduct {
///         name: "Crédito Rápido".into(),
///         annual_rate: dec!(0.30),
///         max_term_months: 18,
///         max_amount: None,
///     })
///     .unwrap();
///
/// assert_eq!(created.id().as_str(), "custom-1000");
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ProductRegistry<G = SequentialIds> {
    products: Vec<LoanProduct>,
    ids: G,
}

impl<G: IdGenerator> ProductRegistry<G> {
    /// An empty registry.
    pub fn new(ids: G) -> Self {
        Self {
            products: Vec::new(),
            ids,
        }
    }

    /// A registry preloaded with [`seed_catalogue`].
    pub fn with_seed_catalogue(ids: G) -> Self {
        Self {
            products: seed_catalogue(),
            ids,
        }
    }

    /// Validate `input`, give it a fresh id and add it to the catalogue.
    ///
    /// The id is drawn from the generator before the collision check, so a
    /// [`RegistryError::DuplicateId`] rejection still consumes that id and
    /// the next call draws a new one.
    pub fn create(&mut self, input: NewLoanProduct) -> Result<LoanProduct, RegistryError> {
        input.validate()?;

        let id = self.ids.next_id();
        if self.get(&id).is_some() {
            return Err(RegistryError::DuplicateId(id));
        }

        let mut product =
            LoanProduct::new(id, input.name, input.annual_rate, input.max_term_months);
        if let Some(max) = input.max_amount {
            product = product.with_max_amount(max);
        }

        info!(
            "created product {} ({}) at {} a year, up to {} months",
            product.id(),
            product.name(),
            product.annual_rate(),
            product.max_term_months()
        );
        self.products.insert(0, product.clone());
        Ok(product)
    }

    /// All products, newest first.
    pub fn list(&self) -> &[LoanProduct] {
        &self.products
    }

    pub fn get(&self, id: &ProductId) -> Option<&LoanProduct> {
        self.products.iter().find(|p| p.id() == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Resolve the requested product, enforce its term and amount caps,
    /// then run the amortization engine.
    pub fn simulate(&self, request: &SimulationRequest) -> Result<SimulationResult, RegistryError> {
        let product = self
            .get(&request.product_id)
            .ok_or_else(|| RegistryError::ProductNotFound(request.product_id.clone()))?;

        if request.term_months > product.max_term_months() {
            return Err(RegistryError::TermExceedsMax {
                product: product.id().clone(),
                requested: request.term_months,
                max: product.max_term_months(),
            });
        }
        if let Some(max) = product.max_amount() {
            if request.amount > max {
                return Err(RegistryError::AmountExceedsMax {
                    product: product.id().clone(),
                    requested: request.amount,
                    max,
                });
            }
        }

        Ok(AmortizationEngine::simulate(
            product,
            request.amount,
            request.term_months,
        )?)
    }
}

impl Default for ProductRegistry<SequentialIds> {
    fn default() -> Self {
        Self::with_seed_catalogue(SequentialIds::default())
    }
}

/// The products available out of the box. Rates are quoted monthly by the
/// lender and stored as nominal annual fractions.
pub fn seed_catalogue() -> Vec<LoanProduct> {
    vec![
        LoanProduct::new("cx-1", "Crédito Pessoal Caixa", dec!(0.029) * dec!(12), 24)
            .with_max_amount(dec!(20000)),
        LoanProduct::new("cx-2", "Consignado INSS", dec!(0.018) * dec!(12), 48)
            .with_max_amount(dec!(60000)),
        LoanProduct::new("cx-3", "Antecipação FGTS", dec!(0.021) * dec!(12), 60)
            .with_max_amount(dec!(15000)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ids::UuidIds;

    fn new_product(name: &str) -> NewLoanProduct {
        NewLoanProduct {
            name: name.to_string(),
            annual_rate: dec!(0.24),
            max_term_months: 12,
            max_amount: Some(dec!(10000)),
        }
    }

    #[test]
    fn test_seed_catalogue() {
        let registry = ProductRegistry::default();
        let ids: Vec<&str> = registry.list().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["cx-1", "cx-2", "cx-3"]);

        let personal = registry.get(&ProductId::new("cx-1")).unwrap();
        assert_eq!(personal.annual_rate(), dec!(0.348));
        assert_eq!(personal.monthly_rate(), dec!(0.029));
        assert_eq!(personal.max_amount(), Some(dec!(20000)));
    }

    #[test]
    fn test_create_lists_newest_first() {
        let mut registry = ProductRegistry::default();
        registry.create(new_product("Primeiro")).unwrap();
        registry.create(new_product("Segundo")).unwrap();

        let names: Vec<&str> = registry.list().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            vec![
                "Segundo",
                "Primeiro",
                "Crédito Pessoal Caixa",
                "Consignado INSS",
                "Antecipação FGTS"
            ]
        );
        assert_eq!(registry.list()[0].id().as_str(), "custom-1001");
    }

    #[test]
    fn test_create_with_uuid_ids() {
        let mut registry = ProductRegistry::new(UuidIds);
        let a = registry.create(new_product("A")).unwrap();
        let b = registry.create(new_product("B")).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(registry.get(a.id()), Some(&a));
    }

    #[test]
    fn test_create_rejects_invalid_input() {
        let mut registry = ProductRegistry::new(SequentialIds::default());

        let mut blank = new_product("   ");
        assert_eq!(registry.create(blank.clone()), Err(RegistryError::EmptyName));

        blank.name = "Ok".into();
        blank.annual_rate = dec!(-0.1);
        assert_eq!(
            registry.create(blank.clone()),
            Err(RegistryError::InvalidRate(dec!(-0.1)))
        );

        blank.annual_rate = dec!(0.1);
        blank.max_term_months = 0;
        assert_eq!(registry.create(blank.clone()), Err(RegistryError::InvalidMaxTerm));

        blank.max_term_months = 6;
        blank.max_amount = Some(Decimal::ZERO);
        assert_eq!(
            registry.create(blank),
            Err(RegistryError::InvalidMaxAmount(Decimal::ZERO))
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_create_rejects_colliding_id() {
        let mut registry = ProductRegistry::with_seed_catalogue(SequentialIds::new("cx", 2));
        let err = registry.create(new_product("Colide")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(ProductId::new("cx-2")));
        assert_eq!(registry.len(), 3);

        // Rejected ids are spent; the generator moves on.
        let err = registry.create(new_product("Colide")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateId(ProductId::new("cx-3")));
        let created = registry.create(new_product("Livre")).unwrap();
        assert_eq!(created.id().as_str(), "cx-4");
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_simulate_through_registry() {
        let registry = ProductRegistry::default();
        let result = registry
            .simulate(&SimulationRequest::new("cx-1", dec!(20000), 24))
            .unwrap();
        assert_eq!(result.installment(), dec!(1168.26));
        assert_eq!(result.product().id().as_str(), "cx-1");
    }

    #[test]
    fn test_simulate_enforces_caps() {
        let registry = ProductRegistry::default();

        let err = registry
            .simulate(&SimulationRequest::new("cx-1", dec!(1000), 25))
            .unwrap_err();
        assert!(matches!(err, RegistryError::TermExceedsMax { max: 24, .. }));

        let err = registry
            .simulate(&SimulationRequest::new("cx-3", dec!(15000.01), 12))
            .unwrap_err();
        assert!(matches!(err, RegistryError::AmountExceedsMax { .. }));
    }

    #[test]
    fn test_simulate_unknown_product() {
        let registry = ProductRegistry::default();
        let err = registry
            .simulate(&SimulationRequest::new("nope", dec!(1000), 12))
            .unwrap_err();
        assert_eq!(err, RegistryError::ProductNotFound(ProductId::new("nope")));
    }

    #[test]
    fn test_simulate_propagates_engine_errors() {
        let registry = ProductRegistry::default();
        let err = registry
            .simulate(&SimulationRequest::new("cx-2", dec!(1000), 0))
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::Simulation(SimulationError::InvalidTerm(0))
        );
    }
}
