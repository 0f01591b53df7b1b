//! HTTP request handlers for the attendance engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::HolidayCalendar;
use crate::pipeline::run_pipeline;
use crate::report::format_day_status;

use super::request::RunRequest;
use super::response::{ApiError, ApiErrorResponse, AsyncRunResponse, ReportRow, RunResponse};
use super::state::{AppState, RunOutcome};

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/run", post(run_handler))
        .route("/run/async", post(run_async_handler))
        .route("/status", get(status_handler))
        .with_state(state)
}

/// Maps a JSON extraction rejection to an API error body.
fn rejection_to_error(rejection: JsonRejection) -> ApiError {
    match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    }
}

/// Builds the validated calendar from a run request.
fn build_calendar(request: &RunRequest) -> Result<HolidayCalendar, ApiErrorResponse> {
    HolidayCalendar::new(
        request.calendar.year,
        request.calendar.month,
        request.calendar.rest_days.iter().copied(),
    )
    .map_err(Into::into)
}

/// Handler for POST /run.
///
/// Runs the full pipeline synchronously and returns the formatted report.
async fn run_handler(
    State(state): State<AppState>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> impl IntoResponse {
    let run_id = Uuid::new_v4();
    info!(run_id = %run_id, "processing synchronous run request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let error = rejection_to_error(rejection);
            warn!(run_id = %run_id, code = %error.code, "rejecting run request");
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error,
            }
            .into_response();
        }
    };

    let calendar = match build_calendar(&request) {
        Ok(calendar) => calendar,
        Err(response) => {
            warn!(run_id = %run_id, "invalid calendar in run request");
            return response.into_response();
        }
    };

    let punch_rows = request.punch_rows();
    let (events, dropped) = request.materialize_events();

    let run_state = state.run_state();
    {
        let mut guard = run_state.write().await;
        guard.run_id = Some(run_id);
        guard.is_running = true;
        guard.started_at = Some(Utc::now());
        guard.finished_at = None;
        guard.outcome = None;
    }

    let result = run_pipeline(&punch_rows, &events, state.policy(), &calendar);

    let mut guard = run_state.write().await;
    guard.is_running = false;
    guard.finished_at = Some(Utc::now());

    match result {
        Ok(outcome) => {
            guard.outcome = Some(RunOutcome {
                success: true,
                error: None,
                summaries: outcome.summaries.clone(),
            });
            drop(guard);

            let report: Vec<ReportRow> = outcome
                .sheet
                .rows()
                .iter()
                .zip(outcome.aggregates.iter())
                .map(|(row, aggregate)| ReportRow {
                    employee: row.employee.clone(),
                    days: row
                        .days
                        .iter()
                        .map(|record| format_day_status(&record.status, record.day, &calendar))
                        .collect(),
                    aggregate: aggregate.clone(),
                })
                .collect();

            info!(
                run_id = %run_id,
                employees = report.len(),
                dropped,
                "run completed"
            );
            (
                StatusCode::OK,
                Json(RunResponse {
                    run_id,
                    expected_working_days: calendar.expected_working_days(),
                    summaries: outcome.summaries,
                    dropped_records: dropped,
                    report,
                }),
            )
                .into_response()
        }
        Err(error) => {
            guard.outcome = Some(RunOutcome {
                success: false,
                error: Some(error.to_string()),
                summaries: Vec::new(),
            });
            drop(guard);

            warn!(run_id = %run_id, %error, "run failed");
            let response: ApiErrorResponse = error.into();
            response.into_response()
        }
    }
}

/// Handler for POST /run/async.
///
/// Validates the request, spawns the run on a background task, and
/// returns immediately. Progress is visible through GET /status.
async fn run_async_handler(
    State(state): State<AppState>,
    payload: Result<Json<RunRequest>, JsonRejection>,
) -> impl IntoResponse {
    let run_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            return ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: rejection_to_error(rejection),
            }
            .into_response();
        }
    };

    let calendar = match build_calendar(&request) {
        Ok(calendar) => calendar,
        Err(response) => return response.into_response(),
    };

    let run_state = state.run_state();
    {
        let mut guard = run_state.write().await;
        if guard.is_running {
            return ApiErrorResponse {
                status: StatusCode::CONFLICT,
                error: ApiError::new("RUN_IN_PROGRESS", "A pipeline run is already executing"),
            }
            .into_response();
        }
        guard.run_id = Some(run_id);
        guard.is_running = true;
        guard.started_at = Some(Utc::now());
        guard.finished_at = None;
        guard.outcome = None;
    }

    info!(run_id = %run_id, "spawning asynchronous run");
    let policy = state.policy().clone();
    tokio::spawn(async move {
        let punch_rows = request.punch_rows();
        let (events, _dropped) = request.materialize_events();
        let result = run_pipeline(&punch_rows, &events, &policy, &calendar);

        let mut guard = run_state.write().await;
        guard.is_running = false;
        guard.finished_at = Some(Utc::now());
        guard.outcome = Some(match result {
            Ok(outcome) => RunOutcome {
                success: true,
                error: None,
                summaries: outcome.summaries,
            },
            Err(error) => {
                warn!(run_id = %run_id, %error, "asynchronous run failed");
                RunOutcome {
                    success: false,
                    error: Some(error.to_string()),
                    summaries: Vec::new(),
                }
            }
        });
    });

    (
        StatusCode::ACCEPTED,
        Json(AsyncRunResponse {
            run_id,
            status: "started".to_string(),
        }),
    )
        .into_response()
}

/// Handler for GET /status.
async fn status_handler(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.run_state().read().await.clone();
    Json(snapshot)
}
