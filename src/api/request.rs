//! Request types for the Salary Engine API.
//!
//! Calculation parameters arrive as a query string and deserialize straight
//! into [`CalculationRequest`](crate::models::CalculationRequest). Record
//! payloads are the `New*` and `*Update` models. This module only holds the
//! query types that have no model counterpart.

use serde::{Deserialize, Serialize};

use crate::models::TaxRateType;

/// Query string of `GET /taxes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxListQuery {
    /// Only list rates of this category.
    #[serde(default)]
    pub tax_type: Option<TaxRateType>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_type_filter_parses_snake_case() {
        let query: TaxListQuery = serde_json::from_str(r#"{"tax_type": "social_fund"}"#).unwrap();
        assert_eq!(query.tax_type, Some(TaxRateType::SocialFund));
    }

    #[test]
    fn test_tax_type_filter_is_optional() {
        let query: TaxListQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, TaxListQuery::default());
    }

    #[test]
    fn test_unknown_tax_type_is_rejected() {
        let result: Result<TaxListQuery, _> = serde_json::from_str(r#"{"tax_type": "vat"}"#);
        assert!(result.is_err());
    }
}
