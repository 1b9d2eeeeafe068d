//! Calculation logic for the Salary Engine.
//!
//! This module contains the salary calculator and its building blocks:
//! the lookup traits it reads rates and exemptions through, rate
//! resolution for the social fund, medical insurance and income tax
//! categories, exemption accumulation, and the final breakdown.

mod exemptions;
#[cfg(test)]
pub(crate) mod fixtures;
mod lookup;
mod rates;
mod salary;

pub use exemptions::total_exemption_amount;
pub use lookup::{ExemptionLookup, RateLookup};
pub use rates::{
    RateSource, ResolvedRate, ResolvedRates, resolve_income_tax_rate,
    resolve_medical_insurance_rate, resolve_social_fund_rate,
};
pub use salary::{calculate_salary, resolve_rates, round_money};
