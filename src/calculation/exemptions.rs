//! Exemption accumulation.
//!
//! Combines the monthly exemption amounts selected by a calculation request
//! into a single figure that reduces taxable income.

use rust_decimal::Decimal;

use super::ExemptionLookup;
use crate::models::{CalculationRequest, ExemptionCode};

fn monthly_amount<L: ExemptionLookup>(lookup: &L, code: ExemptionCode) -> Decimal {
    lookup
        .exemption_by_code(code.as_str())
        .map(|e| e.monthly_amount)
        .unwrap_or(Decimal::ZERO)
}

/// Sums the monthly exemptions that apply to `request`.
///
/// - The increased personal exemption takes precedence over the standard
///   one; the two never apply together.
/// - Only the increased spouse exemption is reachable from a request. The
///   standard `spouse` record is never read.
/// - Dependent exemptions are multiplied by their counts, and a zero count
///   contributes nothing even when the record exists.
///
/// Missing records contribute zero.
pub fn total_exemption_amount<L: ExemptionLookup>(
    lookup: &L,
    request: &CalculationRequest,
) -> Decimal {
    let mut total = Decimal::ZERO;

    if request.use_increased_personal_exemption {
        total += monthly_amount(lookup, ExemptionCode::PersonalIncreased);
    } else if request.use_personal_exemption {
        total += monthly_amount(lookup, ExemptionCode::Personal);
    }

    if request.use_increased_spouse_exemption {
        total += monthly_amount(lookup, ExemptionCode::SpouseIncreased);
    }

    if request.dependent_count > 0 {
        total += monthly_amount(lookup, ExemptionCode::Dependent)
            * Decimal::from(request.dependent_count);
    }

    if request.disabled_dependent_count > 0 {
        total += monthly_amount(lookup, ExemptionCode::DependentDisabled)
            * Decimal::from(request.disabled_dependent_count);
    }

    total
}
