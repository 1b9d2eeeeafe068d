//! Configuration loading and management for the Salary Engine.
//!
//! This module loads the server settings and the default tax rates and
//! exemptions from YAML files. The resulting [`AppConfig`] is built once at
//! startup and handed explicitly to the store and the server bootstrap.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config").unwrap();
//! println!("Seeding {} tax rates", config.seed().tax_rates.len());
//! ```

mod loader;
mod types;

pub use loader::{CONFIG_DIR_ENV, ConfigLoader, DEFAULT_CONFIG_DIR};
pub use types::{
    AppConfig, LogFormat, SeedData, ServerSettings, TaxExemptionsConfig, TaxRatesConfig,
};
