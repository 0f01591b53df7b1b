//! Error types for the attendance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during classification, overlay
//! merging, and aggregation.
//!
//! The variants fall into three tiers with different handling policies:
//! parse errors and lookup misses are logged and skipped record-by-record,
//! while configuration and calendar errors abort the current stage.

use thiserror::Error;

/// The main error type for the attendance engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use attendance_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// The holiday calendar contained inconsistent data.
    #[error("Invalid holiday calendar: {message}")]
    InvalidCalendar {
        /// A description of what made the calendar invalid.
        message: String,
    },

    /// An event timestamp could not be parsed.
    #[error("Invalid event timestamp: '{value}'")]
    InvalidTimestamp {
        /// The raw timestamp text that failed to parse.
        value: String,
    },

    /// An event duration could not be parsed.
    #[error("Invalid event duration: '{value}'")]
    InvalidDuration {
        /// The raw duration text that failed to parse.
        value: String,
    },

    /// An event referenced an employee with no base attendance row.
    #[error("No attendance row for employee: {name}")]
    EmployeeNotFound {
        /// The employee name the event referenced.
        name: String,
    },

    /// A pipeline stage failed in a way that aborts the run.
    #[error("Stage '{stage}' failed: {message}")]
    StageFailed {
        /// The stage that failed.
        stage: String,
        /// A description of the failure.
        message: String,
    },
}

impl EngineError {
    /// Returns true if this error is fatal to a whole pipeline run.
    ///
    /// Parse errors and lookup misses affect a single record and are
    /// skipped by the stage that encounters them; everything else aborts.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            EngineError::InvalidTimestamp { .. }
                | EngineError::InvalidDuration { .. }
                | EngineError::EmployeeNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
