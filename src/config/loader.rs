//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the classifier
//! policy and holiday calendar from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{CalendarConfig, ClassifierPolicy, HolidayCalendar};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/
/// ├── policy.yaml    # Classifier rule thresholds
/// └── calendar.yaml  # Active month and its rest days
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config").unwrap();
/// println!(
///     "{} expected working days",
///     loader.calendar().expected_working_days()
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    policy: ClassifierPolicy,
    calendar: HolidayCalendar,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Errors
    ///
    /// Returns an error if either file is missing, contains invalid YAML,
    /// or the calendar fails validation.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policy = Self::load_yaml::<ClassifierPolicy>(&path.join("policy.yaml"))?;
        let calendar_config = Self::load_yaml::<CalendarConfig>(&path.join("calendar.yaml"))?;
        let calendar = HolidayCalendar::from_config(&calendar_config)?;

        Ok(Self { policy, calendar })
    }

    /// Builds a loader from already-constructed parts. Useful when the
    /// caller supplies the calendar per request instead of from disk.
    pub fn from_parts(policy: ClassifierPolicy, calendar: HolidayCalendar) -> Self {
        Self { policy, calendar }
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

    /// The classifier policy.
    pub fn policy(&self) -> &ClassifierPolicy {
        &self.policy
    }

    /// The holiday calendar.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }
}
