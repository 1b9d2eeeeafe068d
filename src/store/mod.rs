//! In-memory storage of tax rates and exemptions.
//!
//! [`TaxStore`] guards one [`TaxTables`] value with an async read/write
//! lock. A request acquires a session at its start and drops it when it
//! returns, on every path: a [`ReadSession`] is a consistent snapshot for
//! the calculator, and a [`WriteSession`] serializes administrative changes.
//!
//! # Example
//!
//! ```
//! use salary_engine::calculation::RateLookup;
//! use salary_engine::store::TaxStore;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! let store = TaxStore::new();
//! let session = rt.block_on(store.read());
//! assert!(session.rate_by_code("income_tax").is_none());
//! ```

mod tables;

use std::ops::{Deref, DerefMut};

use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::info;

use crate::calculation::{ExemptionLookup, RateLookup};
use crate::config::AppConfig;
use crate::error::SalaryResult;
use crate::models::{TaxExemption, TaxRate};

pub use tables::TaxTables;

/// Shared store of tax rates and exemptions.
#[derive(Debug, Default)]
pub struct TaxStore {
    tables: RwLock<TaxTables>,
}

impl TaxStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with the default rates and exemptions of
    /// `config`.
    ///
    /// # Errors
    ///
    /// Fails if a seed record is invalid or repeats a code.
    pub fn from_config(config: &AppConfig) -> SalaryResult<Self> {
        let mut tables = TaxTables::default();
        seed(&mut tables, config)?;
        Ok(Self {
            tables: RwLock::new(tables),
        })
    }

    /// Acquires a shared session.
    pub async fn read(&self) -> ReadSession<'_> {
        ReadSession(self.tables.read().await)
    }

    /// Acquires an exclusive session.
    pub async fn write(&self) -> WriteSession<'_> {
        WriteSession(self.tables.write().await)
    }
}

/// Inserts seed records into tables that are still empty.
fn seed(tables: &mut TaxTables, config: &AppConfig) -> SalaryResult<()> {
    if tables.rate_count() == 0 && !config.seed.tax_rates.is_empty() {
        for rate in config.seed.tax_rates.iter().cloned() {
            tables.create_rate(rate)?;
        }
        info!(count = tables.rate_count(), "Default tax rates initialized");
    }

    if tables.exemption_count() == 0 && !config.seed.tax_exemptions.is_empty() {
        for exemption in config.seed.tax_exemptions.iter().cloned() {
            tables.create_exemption(exemption)?;
        }
        info!(
            count = tables.exemption_count(),
            "Default tax exemptions initialized"
        );
    }

    Ok(())
}

/// Shared access to the tables, released on drop.
pub struct ReadSession<'a>(RwLockReadGuard<'a, TaxTables>);

/// Exclusive access to the tables, released on drop.
pub struct WriteSession<'a>(RwLockWriteGuard<'a, TaxTables>);

impl Deref for ReadSession<'_> {
    type Target = TaxTables;

    fn deref(&self) -> &TaxTables {
        &self.0
    }
}

impl Deref for WriteSession<'_> {
    type Target = TaxTables;

    fn deref(&self) -> &TaxTables {
        &self.0
    }
}

impl DerefMut for WriteSession<'_> {
    fn deref_mut(&mut self) -> &mut TaxTables {
        &mut self.0
    }
}

impl RateLookup for ReadSession<'_> {
    fn rate_by_code(&self, code: &str) -> Option<&TaxRate> {
        self.0.rate_by_code(code)
    }

    fn rate_by_id(&self, id: i64) -> Option<&TaxRate> {
        self.0.rate_by_id(id)
    }
}

impl ExemptionLookup for ReadSession<'_> {
    fn exemption_by_code(&self, code: &str) -> Option<&TaxExemption> {
        self.0.exemption_by_code(code)
    }
}
