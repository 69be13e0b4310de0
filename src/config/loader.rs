//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax year
//! tables from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::TaxYearConstants;

/// Loads and provides access to tax year tables.
///
/// The `ConfigLoader` reads every YAML file in a directory and indexes the
/// tables by their `year` field. Tables are read-only once loaded; adding a
/// tax year means adding a file, never editing a loaded table.
///
/// # Directory Structure
///
/// ```text
/// config/tax_years/
/// ├── 2025.yaml
/// └── 2026.yaml   # further years as they are published
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tax_years").unwrap();
/// let constants = loader.constants_for(2025).unwrap();
/// println!("SV ceiling: {}", constants.social_insurance.monthly_ceiling);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    tables: BTreeMap<i32, TaxYearConstants>,
}

impl ConfigLoader {
    /// Loads every `*.yaml` tax year table from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The directory is missing or contains no YAML file
    /// - Any file contains invalid YAML or misses a field
    /// - Two files declare the same year
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut tables = BTreeMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let table = Self::load_yaml::<TaxYearConstants>(&path)?;
                let year = table.year;
                if tables.insert(year, table).is_some() {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("duplicate table for tax year {}", year),
                    });
                }
                debug!(year, path = %path.display(), "Loaded tax year table");
            }
        }

        if tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no tax year files found)", dir_str),
            });
        }

        Ok(Self { tables })
    }

    /// Creates a loader holding only the built-in 2025 table.
    pub fn builtin() -> Self {
        Self::from_tables(vec![TaxYearConstants::austria_2025()])
    }

    /// Creates a loader from tables that are already in memory.
    ///
    /// A later table replaces an earlier one for the same year.
    pub fn from_tables(tables: impl IntoIterator<Item = TaxYearConstants>) -> Self {
        Self {
            tables: tables.into_iter().map(|t| (t.year, t)).collect(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets the table for a tax year.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::ConfigLoader;
    /// use payroll_engine::error::EngineError;
    ///
    /// let loader = ConfigLoader::builtin();
    /// assert!(loader.constants_for(2025).is_ok());
    /// assert!(matches!(
    ///     loader.constants_for(1999),
    ///     Err(EngineError::ConfigurationMissing { year: 1999 })
    /// ));
    /// ```
    pub fn constants_for(&self, year: i32) -> EngineResult<&TaxYearConstants> {
        self.tables
            .get(&year)
            .ok_or(EngineError::ConfigurationMissing { year })
    }

    /// Returns the loaded tax years in ascending order.
    pub fn years(&self) -> Vec<i32> {
        self.tables.keys().copied().collect()
    }
}
