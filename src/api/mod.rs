//! HTTP API module for the Salary Engine.
//!
//! This module provides the REST endpoints for calculating salaries and
//! for managing the tax rates and exemptions the calculation reads.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{create_router, WELCOME_MESSAGE};
pub use request::TaxListQuery;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
