//! Net salary calculation.
//!
//! This module ties rate resolution and exemption accumulation together and
//! derives taxable income, income tax, net salary and total employer cost.

use rust_decimal::Decimal;
use tracing::debug;

use super::exemptions::total_exemption_amount;
use super::rates::{
    resolve_income_tax_rate, resolve_medical_insurance_rate, resolve_social_fund_rate,
    ResolvedRates,
};
use super::{ExemptionLookup, RateLookup};
use crate::models::{CalculationRequest, CalculationResult};

/// Rounds to exactly two decimal places, midpoints to even.
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp(2);
    rounded.rescale(2);
    rounded
}

/// Resolves all three rates for `request`.
pub fn resolve_rates<L: RateLookup>(lookup: &L, request: &CalculationRequest) -> ResolvedRates {
    ResolvedRates {
        social_fund: resolve_social_fund_rate(lookup, request.social_rate_id),
        medical_insurance: resolve_medical_insurance_rate(
            lookup,
            request.custom_medical_insurance_rate,
        ),
        income_tax: resolve_income_tax_rate(lookup),
    }
}

/// Calculates the salary breakdown for a validated request.
///
/// Exemptions lower the income tax base only. They are reported in
/// `tax_exemptions` but are not subtracted from net salary a second time.
/// Intermediate values stay unrounded; rounding happens once, on output.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_salary;
/// use salary_engine::models::{CalculationRequest, NewTaxRate, TaxRateType};
/// use salary_engine::store::TaxStore;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let store = TaxStore::new();
/// rt.block_on(async {
///     let mut session = store.write().await;
///     for (rate_type, code, rate) in [
///         (TaxRateType::SocialFund, "social_fund", "0.24"),
///         (TaxRateType::MedicalInsurance, "medical_insurance", "0.09"),
///         (TaxRateType::IncomeTax, "income_tax", "0.12"),
///     ] {
///         session
///             .create_rate(NewTaxRate {
///                 name: code.to_string(),
///                 rate_type,
///                 code: code.to_string(),
///                 rate: Decimal::from_str(rate).unwrap(),
///                 description: None,
///             })
///             .unwrap();
///     }
/// });
///
/// let session = rt.block_on(store.read());
/// let result = calculate_salary(&session, &CalculationRequest::new(Decimal::new(10_000, 0)));
///
/// assert_eq!(result.social_fund, Decimal::from_str("2400.00").unwrap());
/// assert_eq!(result.income_tax, Decimal::from_str("1092.00").unwrap());
/// assert_eq!(result.net_salary, Decimal::from_str("8008.00").unwrap());
/// assert_eq!(result.total_salary, Decimal::from_str("12400.00").unwrap());
/// ```
pub fn calculate_salary<L>(lookup: &L, request: &CalculationRequest) -> CalculationResult
where
    L: RateLookup + ExemptionLookup,
{
    let gross = request.gross_salary;
    let rates = resolve_rates(lookup, request);

    let social_fund = gross * rates.social_fund.rate;
    let medical_insurance = gross * rates.medical_insurance.rate;

    let exemptions = total_exemption_amount(lookup, request);

    let taxable_income = (gross - medical_insurance - exemptions).max(Decimal::ZERO);
    let income_tax = taxable_income * rates.income_tax.rate;

    let net_salary = gross - medical_insurance - income_tax;
    let total_salary = gross + social_fund;

    debug!(
        social_fund_rate = %rates.social_fund.rate,
        social_fund_source = ?rates.social_fund.source,
        medical_insurance_rate = %rates.medical_insurance.rate,
        medical_insurance_source = ?rates.medical_insurance.source,
        income_tax_rate = %rates.income_tax.rate,
        exemptions = %exemptions,
        taxable_income = %taxable_income,
        "Salary calculated"
    );

    CalculationResult {
        gross_salary: round_money(gross),
        social_fund: round_money(social_fund),
        medical_insurance: round_money(medical_insurance),
        income_tax: round_money(income_tax),
        tax_exemptions: round_money(exemptions),
        net_salary: round_money(net_salary),
        total_salary: round_money(total_salary),
    }
}
