//! Salary calculation request and result models.
//!
//! Neither type is persisted: a request is read, computed against the
//! current rates and exemptions, and answered with a [`CalculationResult`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{SalaryError, SalaryResult};

use super::validation::MAX_AMOUNT;

/// Largest magnitude of a custom medical insurance percentage.
pub const MAX_CUSTOM_RATE_PERCENT: i64 = 1_000;

/// Largest accepted dependent count of either kind.
pub const MAX_DEPENDENT_COUNT: i64 = 1_000;

/// Parameters of a single salary calculation.
///
/// # Example
///
/// ```
/// use salary_engine::models::CalculationRequest;
/// use rust_decimal::Decimal;
///
/// let request = CalculationRequest::new(Decimal::new(10_000, 0));
/// assert!(request.validate().is_ok());
/// assert_eq!(request.dependent_count, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// Gross salary, must be greater than zero.
    pub gross_salary: Decimal,
    /// Explicit social fund rate record to use instead of the default.
    #[serde(default)]
    pub social_rate_id: Option<i64>,
    /// Medical insurance rate as a whole percentage (9 means 0.09).
    #[serde(default)]
    pub custom_medical_insurance_rate: Option<i64>,
    /// Apply the standard personal exemption.
    #[serde(default)]
    pub use_personal_exemption: bool,
    /// Apply the increased personal exemption. Takes precedence over the
    /// standard one.
    #[serde(default)]
    pub use_increased_personal_exemption: bool,
    /// Apply the increased spouse exemption.
    #[serde(default)]
    pub use_increased_spouse_exemption: bool,
    /// Number of dependents without disabilities.
    #[serde(default)]
    pub dependent_count: i64,
    /// Number of dependents with disabilities.
    #[serde(default)]
    pub disabled_dependent_count: i64,
}

impl CalculationRequest {
    /// Creates a request for `gross_salary` with every option at its default.
    pub fn new(gross_salary: Decimal) -> Self {
        Self {
            gross_salary,
            social_rate_id: None,
            custom_medical_insurance_rate: None,
            use_personal_exemption: false,
            use_increased_personal_exemption: false,
            use_increased_spouse_exemption: false,
            dependent_count: 0,
            disabled_dependent_count: 0,
        }
    }

    /// Boundary validation run before the calculator.
    ///
    /// Every input is bounded so the calculator cannot overflow.
    pub fn validate(&self) -> SalaryResult<()> {
        if self.gross_salary <= Decimal::ZERO {
            return Err(SalaryError::validation(
                "gross_salary",
                format!("must be greater than 0, got {}", self.gross_salary),
            ));
        }
        if self.gross_salary > Decimal::from(MAX_AMOUNT) {
            return Err(SalaryError::validation(
                "gross_salary",
                format!("must be at most {}, got {}", MAX_AMOUNT, self.gross_salary),
            ));
        }
        if let Some(percent) = self.custom_medical_insurance_rate
            && percent.unsigned_abs() > MAX_CUSTOM_RATE_PERCENT.unsigned_abs()
        {
            return Err(SalaryError::validation(
                "custom_medical_insurance_rate",
                format!(
                    "must be between -{max} and {max}, got {percent}",
                    max = MAX_CUSTOM_RATE_PERCENT
                ),
            ));
        }
        check_count("dependent_count", self.dependent_count)?;
        check_count("disabled_dependent_count", self.disabled_dependent_count)
    }
}

fn check_count(field: &str, count: i64) -> SalaryResult<()> {
    if count < 0 {
        return Err(SalaryError::validation(
            field,
            format!("must be greater than or equal to 0, got {}", count),
        ));
    }
    if count > MAX_DEPENDENT_COUNT {
        return Err(SalaryError::validation(
            field,
            format!("must be at most {}, got {}", MAX_DEPENDENT_COUNT, count),
        ));
    }
    Ok(())
}

/// Breakdown returned by the salary calculator.
///
/// Every amount carries exactly two decimal places and is serialized as a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    /// The gross salary the calculation started from.
    #[serde(with = "rust_decimal::serde::float")]
    pub gross_salary: Decimal,
    /// Employer social fund contribution.
    #[serde(with = "rust_decimal::serde::float")]
    pub social_fund: Decimal,
    /// Employee medical insurance withholding.
    #[serde(with = "rust_decimal::serde::float")]
    pub medical_insurance: Decimal,
    /// Income tax withheld.
    #[serde(with = "rust_decimal::serde::float")]
    pub income_tax: Decimal,
    /// Total exemptions that reduced taxable income. Informational only.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_exemptions: Decimal,
    /// Amount paid to the employee.
    #[serde(with = "rust_decimal::serde::float")]
    pub net_salary: Decimal,
    /// Gross plus social fund: the employer's total cost.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_salary: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_deserialize_request_applies_defaults() {
        let json = r#"{ "gross_salary": "15000.50" }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request, CalculationRequest::new(dec("15000.50")));
    }

    #[test]
    fn test_deserialize_request_with_all_options() {
        let json = r#"{
            "gross_salary": 12000,
            "social_rate_id": 2,
            "custom_medical_insurance_rate": 9,
            "use_personal_exemption": true,
            "use_increased_personal_exemption": false,
            "use_increased_spouse_exemption": true,
            "dependent_count": 2,
            "disabled_dependent_count": 1
        }"#;
        let request: CalculationRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.gross_salary, dec("12000"));
        assert_eq!(request.social_rate_id, Some(2));
        assert_eq!(request.custom_medical_insurance_rate, Some(9));
        assert!(request.use_increased_spouse_exemption);
        assert_eq!(request.dependent_count, 2);
        assert_eq!(request.disabled_dependent_count, 1);
    }

    #[test]
    fn test_validate_rejects_non_positive_gross() {
        for gross in ["0", "-100"] {
            match CalculationRequest::new(dec(gross)).validate() {
                Err(SalaryError::Validation { field, .. }) => assert_eq!(field, "gross_salary"),
                other => panic!("Expected Validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_rejects_negative_counts() {
        let mut request = CalculationRequest::new(dec("1000"));
        request.dependent_count = -1;
        match request.validate() {
            Err(SalaryError::Validation { field, .. }) => assert_eq!(field, "dependent_count"),
            other => panic!("Expected Validation error, got {:?}", other),
        }

        let mut request = CalculationRequest::new(dec("1000"));
        request.disabled_dependent_count = -3;
        match request.validate() {
            Err(SalaryError::Validation { field, .. }) => {
                assert_eq!(field, "disabled_dependent_count")
            }
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    fn rejected_field(request: &CalculationRequest) -> String {
        match request.validate() {
            Err(SalaryError::Validation { field, .. }) => field,
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_gross_near_decimal_max() {
        for gross in ["70000000000000000000000000000", "1000000000000000.01"] {
            let request = CalculationRequest::new(dec(gross));
            assert_eq!(rejected_field(&request), "gross_salary");
        }
        assert!(CalculationRequest::new(Decimal::from(MAX_AMOUNT)).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_extreme_custom_medical_rate() {
        for percent in [i64::MAX, i64::MIN, MAX_CUSTOM_RATE_PERCENT + 1] {
            let mut request = CalculationRequest::new(dec("100000000000000"));
            request.custom_medical_insurance_rate = Some(percent);
            assert_eq!(rejected_field(&request), "custom_medical_insurance_rate");
        }

        let mut request = CalculationRequest::new(dec("1000"));
        request.custom_medical_insurance_rate = Some(-MAX_CUSTOM_RATE_PERCENT);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_extreme_counts() {
        let mut request = CalculationRequest::new(dec("1000"));
        request.dependent_count = i64::MAX;
        assert_eq!(rejected_field(&request), "dependent_count");

        let mut request = CalculationRequest::new(dec("1000"));
        request.disabled_dependent_count = MAX_DEPENDENT_COUNT + 1;
        assert_eq!(rejected_field(&request), "disabled_dependent_count");
    }

    #[test]
    fn test_result_serializes_amounts_as_numbers() {
        let result = CalculationResult {
            gross_salary: dec("10000.00"),
            social_fund: dec("2400.00"),
            medical_insurance: dec("900.00"),
            income_tax: dec("1092.00"),
            tax_exemptions: dec("0.00"),
            net_salary: dec("8008.00"),
            total_salary: dec("12400.00"),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["net_salary"].as_f64(), Some(8008.0));
        assert_eq!(value["income_tax"].as_f64(), Some(1092.0));
        assert!(value["gross_salary"].is_number());
    }
}
