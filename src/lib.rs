//! Salary Engine
//!
//! This crate computes payroll breakdowns from a gross salary: the
//! employer's social fund contribution, the employee's medical insurance
//! and income tax withholdings, and the resulting net and total salary.
//! The rates and exemptions it applies are records managed through the
//! same HTTP API that serves the calculation.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
