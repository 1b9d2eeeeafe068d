//! Field-level checks shared by the create and update payloads.

use rust_decimal::Decimal;

use crate::error::{SalaryError, SalaryResult};

/// Maximum length of `name` and `code` fields.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of the optional `description` field.
pub const MAX_DESCRIPTION_LEN: usize = 255;

/// Largest money amount accepted anywhere in the engine. Products of
/// bounded inputs stay far below `Decimal::MAX`.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Requires `value` to hold between 1 and `MAX_NAME_LEN` characters.
pub fn check_name(field: &str, value: &str) -> SalaryResult<()> {
    let len = value.chars().count();
    if len == 0 {
        return Err(SalaryError::validation(field, "must not be empty"));
    }
    if len > MAX_NAME_LEN {
        return Err(SalaryError::validation(
            field,
            format!("must be at most {} characters, got {}", MAX_NAME_LEN, len),
        ));
    }
    Ok(())
}

/// Limits an optional description to `MAX_DESCRIPTION_LEN` characters.
pub fn check_description(value: Option<&str>) -> SalaryResult<()> {
    if let Some(description) = value {
        let len = description.chars().count();
        if len > MAX_DESCRIPTION_LEN {
            return Err(SalaryError::validation(
                "description",
                format!(
                    "must be at most {} characters, got {}",
                    MAX_DESCRIPTION_LEN, len
                ),
            ));
        }
    }
    Ok(())
}

/// Rates are fractions strictly between 0 and 1.
pub fn check_rate(value: Decimal) -> SalaryResult<()> {
    if value <= Decimal::ZERO || value >= Decimal::ONE {
        return Err(SalaryError::validation(
            "rate",
            format!("must be between 0 and 1 (exclusive), got {}", value),
        ));
    }
    Ok(())
}

/// Requires a money amount between 0 and `MAX_AMOUNT`.
pub fn check_amount(field: &str, value: Decimal) -> SalaryResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(SalaryError::validation(
            field,
            format!("must be greater than or equal to 0, got {}", value),
        ));
    }
    if value > Decimal::from(MAX_AMOUNT) {
        return Err(SalaryError::validation(
            field,
            format!("must be at most {}, got {}", MAX_AMOUNT, value),
        ));
    }
    Ok(())
}
