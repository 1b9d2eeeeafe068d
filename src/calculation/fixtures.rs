//! In-memory lookup fixture shared by the calculation tests.

use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{ExemptionLookup, RateLookup};
use crate::models::{TaxExemption, TaxRate, TaxRateType};

pub fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

#[derive(Debug, Default, Clone)]
pub struct Fixture {
    pub rates: Vec<TaxRate>,
    pub exemptions: Vec<TaxExemption>,
}

impl Fixture {
    /// Social 0.24, medical 0.09 and income tax 0.12 under their default
    /// codes, no exemptions.
    pub fn standard_rates() -> Self {
        Self::default()
            .with_rate(1, TaxRateType::SocialFund, "social_fund", "0.24")
            .with_rate(2, TaxRateType::MedicalInsurance, "medical_insurance", "0.09")
            .with_rate(3, TaxRateType::IncomeTax, "income_tax", "0.12")
    }

    pub fn with_rate(mut self, id: i64, rate_type: TaxRateType, code: &str, rate: &str) -> Self {
        let now = Utc::now();
        self.rates.push(TaxRate {
            id,
            name: code.to_string(),
            rate_type,
            code: code.to_string(),
            rate: dec(rate),
            description: None,
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn with_exemption(mut self, code: &str, monthly: &str) -> Self {
        let now = Utc::now();
        let monthly_amount = dec(monthly);
        self.exemptions.push(TaxExemption {
            id: self.exemptions.len() as i64 + 1,
            name: code.to_string(),
            code: code.to_string(),
            annual_amount: monthly_amount * Decimal::from(12),
            monthly_amount,
            description: None,
            created_at: now,
            updated_at: now,
        });
        self
    }
}

impl RateLookup for Fixture {
    fn rate_by_code(&self, code: &str) -> Option<&TaxRate> {
        self.rates.iter().find(|r| r.code == code)
    }

    fn rate_by_id(&self, id: i64) -> Option<&TaxRate> {
        self.rates.iter().find(|r| r.id == id)
    }
}

impl ExemptionLookup for Fixture {
    fn exemption_by_code(&self, code: &str) -> Option<&TaxExemption> {
        self.exemptions.iter().find(|e| e.code == code)
    }
}
