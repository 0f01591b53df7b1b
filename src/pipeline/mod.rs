//! The classification/merge pipeline.
//!
//! A strictly sequential, single-writer batch over the in-memory
//! [`AttendanceSheet`]: base classification must complete before any
//! overlay runs, and the overlays run in the fixed order
//! Trip → Leave → Overtime because each reads the status the previous
//! stage wrote. The dependency order is modeled as an explicit stage
//! graph enforced by the orchestrator rather than by caller discipline.
//!
//! Per-record failures inside a stage are logged and counted as skipped;
//! only configuration/calendar-level failures abort a run.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::classify::classify_day;
use crate::config::{ClassifierPolicy, HolidayCalendar};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSheet, DayStatus, Employee, EmployeeRow, LeaveEvent, MonthlyAggregate,
    OvertimeEvent, TripEvent,
};
use crate::overlay::{apply_leave_event, apply_overtime_event, apply_trip_event};
use crate::report::aggregate_sheet;

/// A pipeline stage.
///
/// Stages form a linear dependency chain; each stage consumes the sheet
/// state the previous stage persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Base classification of every employee-day from raw punches.
    Classify,
    /// Business-trip overrides.
    TripOverlay,
    /// Leave-note appends.
    LeaveOverlay,
    /// Overtime-note appends.
    OvertimeOverlay,
    /// Monthly aggregation (read-only).
    Aggregate,
}

impl Stage {
    /// Every stage, in execution order.
    pub const ALL: [Stage; 5] = [
        Stage::Classify,
        Stage::TripOverlay,
        Stage::LeaveOverlay,
        Stage::OvertimeOverlay,
        Stage::Aggregate,
    ];

    /// The stage that must complete before this one may run.
    pub fn depends_on(&self) -> Option<Stage> {
        match self {
            Stage::Classify => None,
            Stage::TripOverlay => Some(Stage::Classify),
            Stage::LeaveOverlay => Some(Stage::TripOverlay),
            Stage::OvertimeOverlay => Some(Stage::LeaveOverlay),
            Stage::Aggregate => Some(Stage::OvertimeOverlay),
        }
    }

    /// Stable stage name for logs and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            Stage::Classify => "classify",
            Stage::TripOverlay => "trip-overlay",
            Stage::LeaveOverlay => "leave-overlay",
            Stage::OvertimeOverlay => "overtime-overlay",
            Stage::Aggregate => "aggregate",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Record counts reported by a completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    /// The stage that ran.
    pub stage: Stage,
    /// Records handled successfully.
    pub processed: usize,
    /// Records skipped after a non-fatal error.
    pub skipped: usize,
}

/// One employee's raw punch row: the identity attributes plus one free-form
/// cell per calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunchRow {
    /// The employee the row belongs to.
    pub employee: Employee,
    /// Raw punch cells, one per day of month starting at day 1. Missing
    /// trailing cells are treated as empty.
    #[serde(default)]
    pub cells: Vec<String>,
}

/// The normalized, approval-filtered events for one run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBatch {
    /// Approved business trips.
    #[serde(default)]
    pub trips: Vec<TripEvent>,
    /// Approved leave.
    #[serde(default)]
    pub leaves: Vec<LeaveEvent>,
    /// Approved overtime.
    #[serde(default)]
    pub overtime: Vec<OvertimeEvent>,
}

/// Everything a completed run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutcome {
    /// The final per-day statuses.
    pub sheet: AttendanceSheet,
    /// The monthly aggregates, one per employee in sheet order.
    pub aggregates: Vec<MonthlyAggregate>,
    /// Per-stage record counts, in stage order.
    pub summaries: Vec<StageSummary>,
}

/// Runs the full pipeline over one month of punch rows and events.
///
/// # Errors
///
/// Propagates fatal errors only; per-record parse failures and lookup
/// misses are logged, counted in the stage summaries, and skipped.
pub fn run_pipeline(
    rows: &[PunchRow],
    events: &EventBatch,
    policy: &ClassifierPolicy,
    calendar: &HolidayCalendar,
) -> EngineResult<PipelineOutcome> {
    let mut sheet = AttendanceSheet::new();
    let mut aggregates = Vec::new();
    let mut summaries = Vec::new();
    let mut completed: Vec<Stage> = Vec::new();

    for stage in Stage::ALL {
        if let Some(dependency) = stage.depends_on() {
            if !completed.contains(&dependency) {
                return Err(EngineError::StageFailed {
                    stage: stage.name().to_string(),
                    message: format!("prerequisite stage '{}' has not completed", dependency),
                });
            }
        }

        let summary = match stage {
            Stage::Classify => {
                sheet = classify_rows(rows, policy, calendar);
                StageSummary {
                    stage,
                    processed: rows.len(),
                    skipped: 0,
                }
            }
            Stage::TripOverlay => run_overlay(stage, &events.trips, |event| {
                apply_trip_event(&mut sheet, event, calendar)
            })?,
            Stage::LeaveOverlay => run_overlay(stage, &events.leaves, |event| {
                apply_leave_event(&mut sheet, event, calendar)
            })?,
            Stage::OvertimeOverlay => run_overlay(stage, &events.overtime, |event| {
                apply_overtime_event(&mut sheet, event)
            })?,
            Stage::Aggregate => {
                aggregates = aggregate_sheet(sheet.rows(), calendar);
                StageSummary {
                    stage,
                    processed: aggregates.len(),
                    skipped: 0,
                }
            }
        };

        info!(
            stage = %stage,
            processed = summary.processed,
            skipped = summary.skipped,
            "stage completed"
        );
        summaries.push(summary);
        completed.push(stage);
    }

    Ok(PipelineOutcome {
        sheet,
        aggregates,
        summaries,
    })
}

/// Classifies every punch row into a fresh sheet.
fn classify_rows(
    rows: &[PunchRow],
    policy: &ClassifierPolicy,
    calendar: &HolidayCalendar,
) -> AttendanceSheet {
    let mut sheet = AttendanceSheet::new();
    for punch_row in rows {
        let mut row = EmployeeRow::blank(punch_row.employee.clone(), calendar.days_in_month());
        for day in 1..=calendar.days_in_month() {
            let cell = punch_row
                .cells
                .get((day - 1) as usize)
                .map(String::as_str)
                .unwrap_or("");
            let classification = classify_day(cell, calendar.is_rest_day(day), policy);
            if let Some(record) = row.day_mut(day) {
                record.status = DayStatus::base(classification);
            }
        }
        sheet.push(row);
    }
    sheet
}

/// Applies every event of one overlay stage, skipping records that fail
/// with a non-fatal error.
fn run_overlay<E>(
    stage: Stage,
    events: &[E],
    mut apply: impl FnMut(&E) -> EngineResult<u32>,
) -> EngineResult<StageSummary> {
    let mut processed = 0;
    let mut skipped = 0;

    for event in events {
        match apply(event) {
            Ok(_) => processed += 1,
            Err(error) if !error.is_fatal() => {
                warn!(stage = %stage, %error, "skipping event");
                skipped += 1;
            }
            Err(error) => return Err(error),
        }
    }

    Ok(StageSummary {
        stage,
        processed,
        skipped,
    })
}
