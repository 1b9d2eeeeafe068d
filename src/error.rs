//! Error types for the Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every failure the service can surface: configuration problems at
//! startup, request validation, and administrative lookups that miss or
//! collide. The salary calculator itself never fails.

use thiserror::Error;

/// The main error type for the Salary Engine.
///
/// # Example
///
/// ```
/// use salary_engine::error::SalaryError;
///
/// let error = SalaryError::Conflict {
///     entity: "Tax rate",
///     code: "income_tax".to_string(),
/// };
/// assert_eq!(error.to_string(), "Tax rate with code 'income_tax' already exists");
/// ```
#[derive(Debug, Error)]
pub enum SalaryError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed or failed validation.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A request field was malformed or out of range.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// An administrative lookup by id or code found nothing.
    #[error("{entity} with {key} not found")]
    NotFound {
        /// The kind of record, e.g. "Tax rate".
        entity: &'static str,
        /// How the record was looked up, e.g. "ID 4" or "code 'personal'".
        key: String,
    },

    /// A record with the same unique code already exists.
    #[error("{entity} with code '{code}' already exists")]
    Conflict {
        /// The kind of record, e.g. "Tax exemption".
        entity: &'static str,
        /// The duplicated code.
        code: String,
    },
}

impl SalaryError {
    /// Shorthand for a validation error on `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Not-found error for a lookup by numeric id.
    pub fn not_found_id(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            key: format!("ID {}", id),
        }
    }

    /// Not-found error for a lookup by code.
    pub fn not_found_code(entity: &'static str, code: &str) -> Self {
        Self::NotFound {
            entity,
            key: format!("code '{}'", code),
        }
    }
}

/// A type alias for Results that return SalaryError.
pub type SalaryResult<T> = Result<T, SalaryError>;
