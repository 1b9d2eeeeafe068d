//! Tax rate model and related types.
//!
//! A tax rate is a fraction of gross salary (or of taxable income, for
//! income tax) identified by a unique code.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{check_description, check_name, check_rate};
use crate::error::SalaryResult;

/// The category a tax rate belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxRateType {
    /// Employer-side social fund contribution, added on top of gross.
    SocialFund,
    /// Employee-side medical insurance withholding.
    MedicalInsurance,
    /// Income tax applied to taxable income.
    IncomeTax,
}

impl TaxRateType {
    /// Returns the snake_case name, which is also the default lookup code
    /// for the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxRateType::SocialFund => "social_fund",
            TaxRateType::MedicalInsurance => "medical_insurance",
            TaxRateType::IncomeTax => "income_tax",
        }
    }
}

/// A stored tax rate record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRate {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// The category of the rate.
    #[serde(rename = "type")]
    pub rate_type: TaxRateType,
    /// Unique lookup key (e.g. "income_tax", "social_fund_29").
    pub code: String,
    /// The rate as a fraction in (0, 1).
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    /// Optional description.
    pub description: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a tax rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaxRate {
    /// Human-readable name.
    pub name: String,
    /// The category of the rate.
    #[serde(rename = "type")]
    pub rate_type: TaxRateType,
    /// Unique lookup key.
    pub code: String,
    /// The rate as a fraction in (0, 1).
    pub rate: Decimal,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTaxRate {
    /// Checks every field constraint, reporting the first offending field.
    pub fn validate(&self) -> SalaryResult<()> {
        check_name("name", &self.name)?;
        check_name("code", &self.code)?;
        check_rate(self.rate)?;
        check_description(self.description.as_deref())
    }
}

/// Partial update of a tax rate. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxRateUpdate {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New category.
    #[serde(default, rename = "type")]
    pub rate_type: Option<TaxRateType>,
    /// New lookup key, must stay unique.
    #[serde(default)]
    pub code: Option<String>,
    /// New rate.
    #[serde(default)]
    pub rate: Option<Decimal>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

impl TaxRateUpdate {
    /// Checks the constraints of every field that is present.
    pub fn validate(&self) -> SalaryResult<()> {
        if let Some(name) = &self.name {
            check_name("name", name)?;
        }
        if let Some(code) = &self.code {
            check_name("code", code)?;
        }
        if let Some(rate) = self.rate {
            check_rate(rate)?;
        }
        check_description(self.description.as_deref())
    }

    /// Returns true if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.rate_type.is_none()
            && self.code.is_none()
            && self.rate.is_none()
            && self.description.is_none()
    }
}

impl TaxRate {
    /// Builds a record from a validated payload.
    pub fn from_new(id: i64, new: NewTaxRate, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            rate_type: new.rate_type,
            code: new.code,
            rate: new.rate,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the present fields of `update` and refreshes `updated_at`.
    pub fn apply(&mut self, update: TaxRateUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(rate_type) = update.rate_type {
            self.rate_type = rate_type;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(rate) = update.rate {
            self.rate = rate;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = now;
    }
}
