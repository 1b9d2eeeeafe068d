//! Tax rate resolution.
//!
//! This module decides which rate applies for each of the three tax
//! categories. Every resolver degrades a missing record to a rate of zero.

use rust_decimal::Decimal;

use super::RateLookup;
use crate::models::{TaxRate, TaxRateType};

/// Where a resolved rate came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateSource {
    /// A stored rate record, identified by its code.
    Record {
        /// Code of the record that supplied the rate.
        code: String,
    },
    /// A caller-supplied whole percentage.
    CustomPercent(i64),
    /// No record was found; the rate is zero.
    Missing,
}

/// A rate together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRate {
    /// The rate as a fraction.
    pub rate: Decimal,
    /// Where the rate came from.
    pub source: RateSource,
}

impl ResolvedRate {
    fn from_record(record: Option<&TaxRate>) -> Self {
        match record {
            Some(r) => Self {
                rate: r.rate,
                source: RateSource::Record {
                    code: r.code.clone(),
                },
            },
            None => Self {
                rate: Decimal::ZERO,
                source: RateSource::Missing,
            },
        }
    }
}

/// The three rates a calculation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRates {
    /// Employer social fund contribution rate.
    pub social_fund: ResolvedRate,
    /// Employee medical insurance rate.
    pub medical_insurance: ResolvedRate,
    /// Income tax rate.
    pub income_tax: ResolvedRate,
}

/// Resolves the income tax rate from its default code.
pub fn resolve_income_tax_rate<L: RateLookup>(lookup: &L) -> ResolvedRate {
    ResolvedRate::from_record(lookup.rate_by_code(TaxRateType::IncomeTax.as_str()))
}

/// Resolves the social fund rate.
///
/// An explicit `social_rate_id` wins only when it names an existing record
/// of type `social_fund`. Any other id silently falls back to the default
/// `social_fund` code.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::{resolve_social_fund_rate, RateSource};
/// use salary_engine::store::TaxStore;
/// use rust_decimal::Decimal;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// let store = TaxStore::new();
/// let session = rt.block_on(store.read());
///
/// // Empty store: the explicit id misses and so does the fallback.
/// let resolved = resolve_social_fund_rate(&session, Some(42));
/// assert_eq!(resolved.rate, Decimal::ZERO);
/// assert_eq!(resolved.source, RateSource::Missing);
/// ```
pub fn resolve_social_fund_rate<L: RateLookup>(
    lookup: &L,
    social_rate_id: Option<i64>,
) -> ResolvedRate {
    let explicit = social_rate_id
        .and_then(|id| lookup.rate_by_id(id))
        .filter(|r| r.rate_type == TaxRateType::SocialFund);

    match explicit {
        Some(record) => ResolvedRate::from_record(Some(record)),
        None => ResolvedRate::from_record(lookup.rate_by_code(TaxRateType::SocialFund.as_str())),
    }
}

/// Resolves the medical insurance rate.
///
/// A custom whole percentage is divided by 100 and used as-is, without a
/// range check. Otherwise the default `medical_insurance` code is used.
pub fn resolve_medical_insurance_rate<L: RateLookup>(
    lookup: &L,
    custom_percent: Option<i64>,
) -> ResolvedRate {
    match custom_percent {
        Some(percent) => ResolvedRate {
            rate: Decimal::from(percent) / Decimal::ONE_HUNDRED,
            source: RateSource::CustomPercent(percent),
        },
        None => {
            ResolvedRate::from_record(lookup.rate_by_code(TaxRateType::MedicalInsurance.as_str()))
        }
    }
}
