//! Configuration types for the Salary Engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML files of a configuration directory.

use serde::{Deserialize, Serialize};

use crate::models::{NewTaxExemption, NewTaxRate};

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Server settings from `settings.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// Default log filter, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

/// Tax rates file structure (`tax_rates.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxRatesConfig {
    /// Rates seeded into an empty store.
    #[serde(default)]
    pub tax_rates: Vec<NewTaxRate>,
}

/// Tax exemptions file structure (`tax_exemptions.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct TaxExemptionsConfig {
    /// Exemptions seeded into an empty store.
    #[serde(default)]
    pub tax_exemptions: Vec<NewTaxExemption>,
}

/// Default records inserted at startup.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedData {
    /// Default tax rates.
    pub tax_rates: Vec<NewTaxRate>,
    /// Default tax exemptions.
    pub tax_exemptions: Vec<NewTaxExemption>,
}

/// Complete application configuration.
///
/// Built once at startup and passed by reference to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Server settings.
    pub server: ServerSettings,
    /// Seed data for the store.
    pub seed: SeedData,
}
