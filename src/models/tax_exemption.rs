//! Tax exemption model and related types.
//!
//! Exemptions are fixed currency amounts that reduce taxable income before
//! income tax is applied. Each exemption is keyed by one of the codes in
//! [`ExemptionCode`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{check_description, check_name, check_amount};
use crate::error::{SalaryError, SalaryResult};

/// The closed set of exemption codes.
///
/// # Example
///
/// ```
/// use salary_engine::models::ExemptionCode;
/// use std::str::FromStr;
///
/// let code = ExemptionCode::from_str("dependent_disabled").unwrap();
/// assert_eq!(code, ExemptionCode::DependentDisabled);
/// assert_eq!(code.as_str(), "dependent_disabled");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExemptionCode {
    /// Standard personal exemption.
    Personal,
    /// Increased personal exemption.
    PersonalIncreased,
    /// Standard spouse exemption. Stored, but never applied by the calculator.
    Spouse,
    /// Increased spouse exemption.
    SpouseIncreased,
    /// Exemption per dependent without disabilities.
    Dependent,
    /// Exemption per dependent with disabilities.
    DependentDisabled,
}

impl ExemptionCode {
    /// All codes, in declaration order.
    pub const ALL: [ExemptionCode; 6] = [
        ExemptionCode::Personal,
        ExemptionCode::PersonalIncreased,
        ExemptionCode::Spouse,
        ExemptionCode::SpouseIncreased,
        ExemptionCode::Dependent,
        ExemptionCode::DependentDisabled,
    ];

    /// Returns the stored code string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExemptionCode::Personal => "personal",
            ExemptionCode::PersonalIncreased => "personal_increased",
            ExemptionCode::Spouse => "spouse",
            ExemptionCode::SpouseIncreased => "spouse_increased",
            ExemptionCode::Dependent => "dependent",
            ExemptionCode::DependentDisabled => "dependent_disabled",
        }
    }
}

impl fmt::Display for ExemptionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExemptionCode {
    type Err = SalaryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|code| code.as_str() == s)
            .ok_or_else(|| {
                let known: Vec<&str> = Self::ALL.iter().map(|c| c.as_str()).collect();
                SalaryError::validation(
                    "code",
                    format!("unknown exemption code '{}', expected one of: {}", s, known.join(", ")),
                )
            })
    }
}

/// A stored tax exemption record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxExemption {
    /// Unique identifier assigned by the store.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Unique lookup key, one of [`ExemptionCode`].
    pub code: String,
    /// Annual exemption amount.
    #[serde(with = "rust_decimal::serde::float")]
    pub annual_amount: Decimal,
    /// Monthly exemption amount, the figure used by the calculator.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_amount: Decimal,
    /// Optional description.
    pub description: Option<String>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a tax exemption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTaxExemption {
    /// Human-readable name.
    pub name: String,
    /// Lookup key, one of [`ExemptionCode`].
    pub code: String,
    /// Annual exemption amount.
    pub annual_amount: Decimal,
    /// Monthly exemption amount.
    pub monthly_amount: Decimal,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTaxExemption {
    /// Checks every field constraint, reporting the first offending field.
    pub fn validate(&self) -> SalaryResult<()> {
        check_name("name", &self.name)?;
        check_name("code", &self.code)?;
        ExemptionCode::from_str(&self.code)?;
        check_amount("annual_amount", self.annual_amount)?;
        check_amount("monthly_amount", self.monthly_amount)?;
        check_description(self.description.as_deref())
    }
}

/// Partial update of a tax exemption. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxExemptionUpdate {
    /// New name.
    #[serde(default)]
    pub name: Option<String>,
    /// New lookup key, must stay unique.
    #[serde(default)]
    pub code: Option<String>,
    /// New annual amount.
    #[serde(default)]
    pub annual_amount: Option<Decimal>,
    /// New monthly amount.
    #[serde(default)]
    pub monthly_amount: Option<Decimal>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
}

impl TaxExemptionUpdate {
    /// Checks the constraints of every field that is present.
    pub fn validate(&self) -> SalaryResult<()> {
        if let Some(name) = &self.name {
            check_name("name", name)?;
        }
        if let Some(code) = &self.code {
            check_name("code", code)?;
            ExemptionCode::from_str(code)?;
        }
        if let Some(amount) = self.annual_amount {
            check_amount("annual_amount", amount)?;
        }
        if let Some(amount) = self.monthly_amount {
            check_amount("monthly_amount", amount)?;
        }
        check_description(self.description.as_deref())
    }

    /// Returns true if the update carries no fields.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.code.is_none()
            && self.annual_amount.is_none()
            && self.monthly_amount.is_none()
            && self.description.is_none()
    }
}

impl TaxExemption {
    /// Builds a record from a validated payload.
    pub fn from_new(id: i64, new: NewTaxExemption, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            code: new.code,
            annual_amount: new.annual_amount,
            monthly_amount: new.monthly_amount,
            description: new.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the present fields of `update` and refreshes `updated_at`.
    pub fn apply(&mut self, update: TaxExemptionUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(amount) = update.annual_amount {
            self.annual_amount = amount;
        }
        if let Some(amount) = update.monthly_amount {
            self.monthly_amount = amount;
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        self.updated_at = now;
    }
}
