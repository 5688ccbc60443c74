//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax schedules
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};

use super::types::{BracketsConfig, RateTable, ScheduleMetadata, TaxSchedule};

/// Loads and provides access to a tax schedule.
///
/// # Directory Structure
///
/// ```text
/// config/nta2025/
/// ├── schedule.yaml   # Schedule metadata
/// ├── brackets.yaml   # Marginal bands, ascending
/// └── rates.yaml      # Contribution rates and relief set
/// ```
///
/// # Example
///
/// ```no_run
/// use paye_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/nta2025")?;
/// for bracket in loader.schedule().brackets() {
///     println!("{} -> {:?} @ {}", bracket.lower_bound, bracket.upper_bound, bracket.rate);
/// }
/// # Ok::<(), paye_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    schedule: TaxSchedule,
}

impl ConfigLoader {
    /// Loads a schedule from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - Any required file is missing (`ConfigNotFound`)
    /// - Any file contains invalid YAML or misses a field (`ConfigParseError`)
    /// - The brackets or rates break a schedule invariant (`InvalidSchedule`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading tax schedule");

        let metadata = Self::load_yaml::<ScheduleMetadata>(&path.join("schedule.yaml"))?;
        let brackets = Self::load_yaml::<BracketsConfig>(&path.join("brackets.yaml"))?;
        let rates = Self::load_yaml::<RateTable>(&path.join("rates.yaml"))?;

        let schedule = TaxSchedule::new(metadata, brackets.brackets, rates)?;

        info!(
            code = %schedule.metadata().code,
            effective_date = %schedule.metadata().effective_date,
            brackets = schedule.brackets().len(),
            "Tax schedule loaded"
        );

        Ok(Self { schedule })
    }

    /// Wraps an already-built schedule, e.g. [`TaxSchedule::nta_2025`].
    pub fn from_schedule(schedule: TaxSchedule) -> Self {
        Self { schedule }
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

    /// Returns the loaded schedule.
    pub fn schedule(&self) -> &TaxSchedule {
        &self.schedule
    }

    /// Returns the schedule metadata.
    pub fn metadata(&self) -> &ScheduleMetadata {
        self.schedule.metadata()
    }

    /// Consumes the loader, returning the schedule.
    pub fn into_schedule(self) -> TaxSchedule {
        self.schedule
    }
}
