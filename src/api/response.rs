//! Response types for the attendance engine API.
//!
//! This module defines the run-report payload and the error response
//! structures for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::{Employee, MonthlyAggregate};
use crate::pipeline::StageSummary;

/// One employee's row in the run report: identity, the formatted day
/// cells, and the monthly aggregate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    /// The employee's identity attributes.
    pub employee: Employee,
    /// Icon-annotated status text, one cell per day of month.
    pub days: Vec<String>,
    /// The monthly counters.
    pub aggregate: MonthlyAggregate,
}

/// Response body for a successful synchronous `/run`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResponse {
    /// Correlation id of the run.
    pub run_id: Uuid,
    /// Days in the month minus rest days.
    pub expected_working_days: u32,
    /// Per-stage record counts, in stage order.
    pub summaries: Vec<StageSummary>,
    /// Event records dropped at ingestion for parse errors.
    pub dropped_records: usize,
    /// One row per employee, in sheet order.
    pub report: Vec<ReportRow>,
}

/// Response body for an accepted asynchronous `/run/async`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsyncRunResponse {
    /// Correlation id of the spawned run.
    pub run_id: Uuid,
    /// Always `"started"`.
    pub status: String,
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidCalendar { message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_CALENDAR",
                    "Invalid holiday calendar",
                    message,
                ),
            },
            EngineError::InvalidTimestamp { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_TIMESTAMP",
                    format!("Invalid event timestamp: '{}'", value),
                    "The event timestamp could not be parsed",
                ),
            },
            EngineError::InvalidDuration { value } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "INVALID_DURATION",
                    format!("Invalid event duration: '{}'", value),
                    "The event duration could not be parsed",
                ),
            },
            EngineError::EmployeeNotFound { name } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "EMPLOYEE_NOT_FOUND",
                    format!("No attendance row for employee: {}", name),
                    "The event references an employee with no punch row",
                ),
            },
            EngineError::StageFailed { stage, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "STAGE_FAILED",
                    format!("Stage '{}' failed", stage),
                    message,
                ),
            },
        }
    }
}
