//! Core data models for the Salary Engine.
//!
//! This module contains the tax rate and exemption records managed by the
//! store, and the request/result types of the salary calculator.

mod salary;
mod tax_exemption;
mod tax_rate;
mod validation;

pub use salary::{
    CalculationRequest, CalculationResult, MAX_CUSTOM_RATE_PERCENT, MAX_DEPENDENT_COUNT,
};
pub use tax_exemption::{ExemptionCode, NewTaxExemption, TaxExemption, TaxExemptionUpdate};
pub use tax_rate::{NewTaxRate, TaxRate, TaxRateType, TaxRateUpdate};
pub use validation::MAX_AMOUNT;
