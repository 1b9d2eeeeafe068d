//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the service
//! configuration from YAML files.

use std::collections::HashSet;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::error::{SalaryError, SalaryResult};

use super::types::{AppConfig, SeedData, ServerSettings, TaxExemptionsConfig, TaxRatesConfig};

/// Environment variable naming the configuration directory.
pub const CONFIG_DIR_ENV: &str = "SALARY_CONFIG_DIR";

/// Directory used when [`CONFIG_DIR_ENV`] is unset.
pub const DEFAULT_CONFIG_DIR: &str = "./config";

/// Loads and provides access to the service configuration.
///
/// # Directory Structure
///
/// ```text
/// config/
/// ├── settings.yaml        # Listen address and logging
/// ├── tax_rates.yaml       # Default tax rates
/// └── tax_exemptions.yaml  # Default tax exemptions
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config")?;
/// println!("Listening on {}", loader.settings().listen_addr);
/// # Ok::<(), salary_engine::error::SalaryError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A setting or seed record fails validation
    pub fn load<P: AsRef<Path>>(path: P) -> SalaryResult<Self> {
        let path = path.as_ref();

        let settings_path = path.join("settings.yaml");
        let server = Self::load_yaml::<ServerSettings>(&settings_path)?;
        Self::validate_settings(&server, &settings_path)?;

        let rates_path = path.join("tax_rates.yaml");
        let rates = Self::load_yaml::<TaxRatesConfig>(&rates_path)?;
        Self::validate_seed(
            rates.tax_rates.iter().map(|r| (r.code.as_str(), r.validate())),
            &rates_path,
        )?;

        let exemptions_path = path.join("tax_exemptions.yaml");
        let exemptions = Self::load_yaml::<TaxExemptionsConfig>(&exemptions_path)?;
        Self::validate_seed(
            exemptions
                .tax_exemptions
                .iter()
                .map(|e| (e.code.as_str(), e.validate())),
            &exemptions_path,
        )?;

        Ok(Self {
            config: AppConfig {
                server,
                seed: SeedData {
                    tax_rates: rates.tax_rates,
                    tax_exemptions: exemptions.tax_exemptions,
                },
            },
        })
    }

    /// Loads from [`CONFIG_DIR_ENV`], falling back to [`DEFAULT_CONFIG_DIR`].
    pub fn from_env() -> SalaryResult<Self> {
        let dir = std::env::var(CONFIG_DIR_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
        Self::load(dir)
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> SalaryResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| SalaryError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| SalaryError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_settings(settings: &ServerSettings, path: &Path) -> SalaryResult<()> {
        let parse_error = |message: String| SalaryError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        settings.listen_addr.parse::<SocketAddr>().map_err(|e| {
            parse_error(format!("invalid listen_addr '{}': {}", settings.listen_addr, e))
        })?;

        if settings.log_level.trim().is_empty() {
            return Err(parse_error("log_level must not be empty".to_string()));
        }

        Ok(())
    }

    /// Runs each seed record's validation and rejects repeated codes.
    fn validate_seed<'a>(
        records: impl Iterator<Item = (&'a str, SalaryResult<()>)>,
        path: &Path,
    ) -> SalaryResult<()> {
        let mut seen = HashSet::new();
        for (index, (code, validation)) in records.enumerate() {
            if let Err(err) = validation {
                return Err(SalaryError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("record {} ('{}'): {}", index, code, err),
                });
            }
            if !seen.insert(code) {
                return Err(SalaryError::ConfigParseError {
                    path: path.display().to_string(),
                    message: format!("duplicate code '{}'", code),
                });
            }
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Returns the server settings.
    pub fn settings(&self) -> &ServerSettings {
        &self.config.server
    }

    /// Returns the seed data.
    pub fn seed(&self) -> &SeedData {
        &self.config.seed
    }
}
