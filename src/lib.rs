//! # loan-simulator
//!
//! Fixed-installment (Price table / French amortization) loan simulation.
//!
//! Given a loan product's annual rate, a principal and a term in months,
//! the engine derives a constant monthly installment and the month-by-month
//! split of interest, amortized principal and remaining balance.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: products, requests, money rounding, display formatting
//! - **amortization**: The Price-table engine and its schedule/result types
//! - **registry**: In-memory loan product catalogue with pluggable id generation

pub mod amortization;
pub mod core;
pub mod registry;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::amortization::engine::{AmortizationEngine, SimulationError};
    pub use crate::amortization::schedule::{AmortizationItem, SimulationResult};
    pub use crate::core::money::round2;
    pub use crate::core::product::{LoanProduct, ProductId, SimulationRequest};
    pub use crate::registry::catalogue::{NewLoanProduct, ProductRegistry, RegistryError};
    pub use crate::registry::ids::{IdGenerator, SequentialIds, UuidIds};
}
