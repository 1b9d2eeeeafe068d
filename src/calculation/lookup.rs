//! Lookup capabilities the calculator reads rates and exemptions through.
//!
//! The calculator never touches storage directly. Anything that can answer
//! these point lookups (a store session, a test fixture) can drive it. A
//! miss is `None`, never an error.

use crate::models::{TaxExemption, TaxRate};

/// Point lookups over the tax rate collection.
pub trait RateLookup {
    /// Finds the rate whose `code` equals `code`.
    fn rate_by_code(&self, code: &str) -> Option<&TaxRate>;

    /// Finds the rate with the given id.
    fn rate_by_id(&self, id: i64) -> Option<&TaxRate>;
}

/// Point lookups over the tax exemption collection.
pub trait ExemptionLookup {
    /// Finds the exemption whose `code` equals `code`.
    fn exemption_by_code(&self, code: &str) -> Option<&TaxExemption>;
}

impl<T: RateLookup + ?Sized> RateLookup for &T {
    fn rate_by_code(&self, code: &str) -> Option<&TaxRate> {
        (**self).rate_by_code(code)
    }

    fn rate_by_id(&self, id: i64) -> Option<&TaxRate> {
        (**self).rate_by_id(id)
    }
}

impl<T: ExemptionLookup + ?Sized> ExemptionLookup for &T {
    fn exemption_by_code(&self, code: &str) -> Option<&TaxExemption> {
        (**self).exemption_by_code(code)
    }
}
