//! The tax rate and exemption tables and their CRUD operations.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::calculation::{ExemptionLookup, RateLookup};
use crate::error::{SalaryError, SalaryResult};
use crate::models::{
    NewTaxExemption, NewTaxRate, TaxExemption, TaxExemptionUpdate, TaxRate, TaxRateType,
    TaxRateUpdate,
};

const TAX_RATE: &str = "Tax rate";
const TAX_EXEMPTION: &str = "Tax exemption";

/// In-memory tables keyed by id. Ids are assigned from 1 upwards and never
/// reused after a delete.
#[derive(Debug, Default, Clone)]
pub struct TaxTables {
    rates: BTreeMap<i64, TaxRate>,
    exemptions: BTreeMap<i64, TaxExemption>,
    last_rate_id: i64,
    last_exemption_id: i64,
}

impl TaxTables {
    /// Lists rates ordered by id, optionally restricted to one type.
    pub fn list_rates(&self, rate_type: Option<TaxRateType>) -> Vec<TaxRate> {
        self.rates
            .values()
            .filter(|r| rate_type.is_none_or(|t| r.rate_type == t))
            .cloned()
            .collect()
    }

    /// Gets a rate by id.
    pub fn rate(&self, id: i64) -> SalaryResult<&TaxRate> {
        self.rates
            .get(&id)
            .ok_or_else(|| SalaryError::not_found_id(TAX_RATE, id))
    }

    /// Gets a rate by code.
    pub fn rate_with_code(&self, code: &str) -> SalaryResult<&TaxRate> {
        self.rate_by_code(code)
            .ok_or_else(|| SalaryError::not_found_code(TAX_RATE, code))
    }

    /// Creates a rate.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryError::Validation`] for an invalid payload and
    /// [`SalaryError::Conflict`] if the code is taken.
    pub fn create_rate(&mut self, new: NewTaxRate) -> SalaryResult<TaxRate> {
        new.validate()?;
        if self.rate_by_code(&new.code).is_some() {
            return Err(SalaryError::Conflict {
                entity: TAX_RATE,
                code: new.code,
            });
        }

        self.last_rate_id += 1;
        let rate = TaxRate::from_new(self.last_rate_id, new, Utc::now());
        self.rates.insert(rate.id, rate.clone());
        Ok(rate)
    }

    /// Applies a partial update. An empty update returns the record as is.
    pub fn update_rate(&mut self, id: i64, update: TaxRateUpdate) -> SalaryResult<TaxRate> {
        let current = self.rate(id)?;
        if update.is_empty() {
            return Ok(current.clone());
        }
        update.validate()?;

        if let Some(code) = &update.code
            && self.rates.values().any(|r| r.id != id && &r.code == code)
        {
            return Err(SalaryError::Conflict {
                entity: TAX_RATE,
                code: code.clone(),
            });
        }

        let rate = self
            .rates
            .get_mut(&id)
            .ok_or_else(|| SalaryError::not_found_id(TAX_RATE, id))?;
        rate.apply(update, Utc::now());
        Ok(rate.clone())
    }

    /// Deletes a rate.
    pub fn delete_rate(&mut self, id: i64) -> SalaryResult<()> {
        self.rates
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SalaryError::not_found_id(TAX_RATE, id))
    }

    /// Lists exemptions ordered by id.
    pub fn list_exemptions(&self) -> Vec<TaxExemption> {
        self.exemptions.values().cloned().collect()
    }

    /// Gets an exemption by id.
    pub fn exemption(&self, id: i64) -> SalaryResult<&TaxExemption> {
        self.exemptions
            .get(&id)
            .ok_or_else(|| SalaryError::not_found_id(TAX_EXEMPTION, id))
    }

    /// Gets an exemption by code.
    pub fn exemption_with_code(&self, code: &str) -> SalaryResult<&TaxExemption> {
        self.exemption_by_code(code)
            .ok_or_else(|| SalaryError::not_found_code(TAX_EXEMPTION, code))
    }

    /// Creates an exemption.
    ///
    /// # Errors
    ///
    /// Returns [`SalaryError::Validation`] for an invalid payload (including a
    /// code outside the known set) and [`SalaryError::Conflict`] if the code
    /// is taken.
    pub fn create_exemption(&mut self, new: NewTaxExemption) -> SalaryResult<TaxExemption> {
        new.validate()?;
        if self.exemption_by_code(&new.code).is_some() {
            return Err(SalaryError::Conflict {
                entity: TAX_EXEMPTION,
                code: new.code,
            });
        }

        self.last_exemption_id += 1;
        let exemption = TaxExemption::from_new(self.last_exemption_id, new, Utc::now());
        self.exemptions.insert(exemption.id, exemption.clone());
        Ok(exemption)
    }

    /// Applies a partial update. An empty update returns the record as is.
    pub fn update_exemption(
        &mut self,
        id: i64,
        update: TaxExemptionUpdate,
    ) -> SalaryResult<TaxExemption> {
        let current = self.exemption(id)?;
        if update.is_empty() {
            return Ok(current.clone());
        }
        update.validate()?;

        if let Some(code) = &update.code
            && self.exemptions.values().any(|e| e.id != id && &e.code == code)
        {
            return Err(SalaryError::Conflict {
                entity: TAX_EXEMPTION,
                code: code.clone(),
            });
        }

        let exemption = self
            .exemptions
            .get_mut(&id)
            .ok_or_else(|| SalaryError::not_found_id(TAX_EXEMPTION, id))?;
        exemption.apply(update, Utc::now());
        Ok(exemption.clone())
    }

    /// Deletes an exemption.
    pub fn delete_exemption(&mut self, id: i64) -> SalaryResult<()> {
        self.exemptions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| SalaryError::not_found_id(TAX_EXEMPTION, id))
    }

    /// Number of stored rates.
    pub fn rate_count(&self) -> usize {
        self.rates.len()
    }

    /// Number of stored exemptions.
    pub fn exemption_count(&self) -> usize {
        self.exemptions.len()
    }
}

impl RateLookup for TaxTables {
    fn rate_by_code(&self, code: &str) -> Option<&TaxRate> {
        self.rates.values().find(|r| r.code == code)
    }

    fn rate_by_id(&self, id: i64) -> Option<&TaxRate> {
        self.rates.get(&id)
    }
}

impl ExemptionLookup for TaxTables {
    fn exemption_by_code(&self, code: &str) -> Option<&TaxExemption> {
        self.exemptions.values().find(|e| e.code == code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn new_rate(code: &str, rate_type: TaxRateType, rate: &str) -> NewTaxRate {
        NewTaxRate {
            name: format!("{} rate", code),
            rate_type,
            code: code.to_string(),
            rate: dec(rate),
            description: None,
        }
    }

    fn new_exemption(code: &str, monthly: &str) -> NewTaxExemption {
        NewTaxExemption {
            name: code.to_string(),
            code: code.to_string(),
            annual_amount: dec(monthly) * Decimal::from(12),
            monthly_amount: dec(monthly),
            description: None,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let mut tables = TaxTables::default();
        let a = tables
            .create_rate(new_rate("social_fund_24", TaxRateType::SocialFund, "0.24"))
            .unwrap();
        let b = tables
            .create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.12"))
            .unwrap();

        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let mut tables = TaxTables::default();
        let first = tables
            .create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.12"))
            .unwrap();
        tables.delete_rate(first.id).unwrap();
        let second = tables
            .create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.12"))
            .unwrap();

        assert_eq!(second.id, 2);
    }

    #[test]
    fn test_duplicate_rate_code_conflicts() {
        let mut tables = TaxTables::default();
        tables
            .create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.12"))
            .unwrap();

        match tables.create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.10")) {
            Err(SalaryError::Conflict { code, .. }) => assert_eq!(code, "income_tax"),
            other => panic!("Expected Conflict error, got {:?}", other),
        }
        assert_eq!(tables.rate_count(), 1);
    }

    #[test]
    fn test_invalid_rate_is_not_stored() {
        let mut tables = TaxTables::default();
        let result = tables.create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "1.2"));

        assert!(matches!(result, Err(SalaryError::Validation { .. })));
        assert_eq!(tables.rate_count(), 0);
    }

    #[test]
    fn test_list_rates_filters_by_type() {
        let mut tables = TaxTables::default();
        for (code, rate_type, rate) in [
            ("social_fund_24", TaxRateType::SocialFund, "0.24"),
            ("medical_insurance", TaxRateType::MedicalInsurance, "0.09"),
            ("social_fund_29", TaxRateType::SocialFund, "0.29"),
        ] {
            tables.create_rate(new_rate(code, rate_type, rate)).unwrap();
        }

        let social = tables.list_rates(Some(TaxRateType::SocialFund));
        let codes: Vec<&str> = social.iter().map(|r| r.code.as_str()).collect();
        assert_eq!(codes, vec!["social_fund_24", "social_fund_29"]);
        assert_eq!(tables.list_rates(None).len(), 3);
        assert!(tables.list_rates(Some(TaxRateType::IncomeTax)).is_empty());
    }

    #[test]
    fn test_update_rate_changes_fields_and_timestamp() {
        let mut tables = TaxTables::default();
        let created = tables
            .create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.12"))
            .unwrap();

        let updated = tables
            .update_rate(
                created.id,
                TaxRateUpdate {
                    rate: Some(dec("0.10")),
                    description: Some("Reduced".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.rate, dec("0.10"));
        assert_eq!(updated.description.as_deref(), Some("Reduced"));
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(tables.rate_by_code("income_tax").unwrap().rate, dec("0.10"));
    }

    #[test]
    fn test_empty_update_returns_record_unchanged() {
        let mut tables = TaxTables::default();
        let created = tables
            .create_rate(new_rate("income_tax", TaxRateType::IncomeTax, "0.12"))
            .unwrap();

        let same = tables.update_rate(created.id, TaxRateUpdate::default()).unwrap();
        assert_eq!(same, created);
    }

    #[test]
    fn test_update_to_taken_code_conflicts() {
        let mut tables = TaxTables::default();
        tables
            .create_rate(new_rate("social_fund_24", TaxRateType::SocialFund, "0.24"))
            .unwrap();
        let other = tables
            .create_rate(new_rate("social_fund_29", TaxRateType::SocialFund, "0.29"))
            .unwrap();

        let result = tables.update_rate(
            other.id,
            TaxRateUpdate {
                code: Some("social_fund_24".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(SalaryError::Conflict { .. })));

        // Re-submitting a record's own code is not a conflict.
        let result = tables.update_rate(
            other.id,
            TaxRateUpdate {
                code: Some("social_fund_29".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_rate_is_not_found() {
        let mut tables = TaxTables::default();

        assert!(matches!(tables.rate(4), Err(SalaryError::NotFound { .. })));
        assert!(matches!(
            tables.rate_with_code("income_tax"),
            Err(SalaryError::NotFound { .. })
        ));
        assert!(matches!(
            tables.update_rate(4, TaxRateUpdate::default()),
            Err(SalaryError::NotFound { .. })
        ));
        assert!(matches!(tables.delete_rate(4), Err(SalaryError::NotFound { .. })));
    }

    #[test]
    fn test_exemption_crud() {
        let mut tables = TaxTables::default();
        let created = tables.create_exemption(new_exemption("dependent", "825")).unwrap();
        assert_eq!(tables.exemption_with_code("dependent").unwrap().id, created.id);

        let updated = tables
            .update_exemption(
                created.id,
                TaxExemptionUpdate {
                    monthly_amount: Some(dec("900")),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.monthly_amount, dec("900"));
        assert_eq!(tables.list_exemptions().len(), 1);

        tables.delete_exemption(created.id).unwrap();
        assert_eq!(tables.exemption_count(), 0);
        assert!(matches!(
            tables.exemption(created.id),
            Err(SalaryError::NotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_exemption_code_conflicts() {
        let mut tables = TaxTables::default();
        tables.create_exemption(new_exemption("personal", "2475")).unwrap();

        assert!(matches!(
            tables.create_exemption(new_exemption("personal", "2000")),
            Err(SalaryError::Conflict { .. })
        ));
    }

    #[test]
    fn test_unknown_exemption_code_is_rejected() {
        let mut tables = TaxTables::default();

        match tables.create_exemption(new_exemption("pet", "100")) {
            Err(SalaryError::Validation { field, .. }) => assert_eq!(field, "code"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_lookups_report_absent_as_none() {
        let tables = TaxTables::default();

        assert!(tables.rate_by_code("income_tax").is_none());
        assert!(tables.rate_by_id(1).is_none());
        assert!(tables.exemption_by_code("personal").is_none());
    }
}
