//! Request types for the attendance engine API.
//!
//! This module defines the JSON request structures for the run endpoints
//! and their conversion into domain types. Event records arrive raw, one
//! per upstream row, and are materialized here: the per-source approval
//! filter runs first, then timestamps are parsed, and leave names have the
//! suffix marker stripped. Records that fail to parse are logged and
//! dropped without aborting the batch.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineResult;
use crate::models::{
    Employee, LeaveEvent, OvertimeEvent, SourceSystem, TripEvent, parse_event_date,
    strip_name_suffix,
};
use crate::pipeline::{EventBatch, PunchRow};

/// Request body for the `/run` and `/run/async` endpoints.
///
/// Carries the active month's calendar, the raw punch rows, and the three
/// raw event lists for one batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    /// The active month and its rest days.
    pub calendar: CalendarRequest,
    /// One raw punch row per employee.
    #[serde(default)]
    pub rows: Vec<PunchRowRequest>,
    /// Raw business-trip records.
    #[serde(default)]
    pub trips: Vec<TripRecordRequest>,
    /// Raw leave records.
    #[serde(default)]
    pub leaves: Vec<LeaveRecordRequest>,
    /// Raw overtime records.
    #[serde(default)]
    pub overtime: Vec<OvertimeRecordRequest>,
}

/// The active month in a run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarRequest {
    /// The active year.
    pub year: i32,
    /// The active month, 1-12.
    pub month: u32,
    /// Days of the month designated as rest days.
    #[serde(default)]
    pub rest_days: Vec<u32>,
}

/// One employee's raw punch row in a run request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunchRowRequest {
    /// The employee's name.
    pub name: String,
    /// The attendance group.
    #[serde(default)]
    pub group: String,
    /// The department.
    #[serde(default)]
    pub department: String,
    /// The internal employee number.
    #[serde(default)]
    pub employee_id: String,
    /// The position title.
    #[serde(default)]
    pub position: String,
    /// The upstream clock system's user id.
    #[serde(default)]
    pub external_user_id: String,
    /// Raw punch cells, one per day of month starting at day 1.
    #[serde(default)]
    pub days: Vec<String>,
}

impl From<PunchRowRequest> for PunchRow {
    fn from(request: PunchRowRequest) -> Self {
        PunchRow {
            employee: Employee {
                name: request.name,
                group: request.group,
                department: request.department,
                employee_id: request.employee_id,
                position: request.position,
                external_user_id: request.external_user_id,
            },
            cells: request.days,
        }
    }
}

/// A raw business-trip record from an upstream export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripRecordRequest {
    /// The employee's name.
    pub name: String,
    /// Start timestamp text, e.g. `2025-05-07 08:30`.
    pub start: String,
    /// End timestamp text.
    pub end: String,
    /// The trip reason.
    #[serde(default)]
    pub reason: String,
    /// The upstream system the record came from.
    pub source: SourceSystem,
    /// The record's literal approval status.
    pub approval_status: String,
}

impl TripRecordRequest {
    /// Materializes the record into a domain event, or `None` when the
    /// approval status is not the accepted one for its source.
    pub fn materialize(&self) -> EngineResult<Option<TripEvent>> {
        if !self.source.accepts(&self.approval_status) {
            return Ok(None);
        }
        Ok(Some(TripEvent {
            employee_name: self.name.clone(),
            start: parse_event_date(&self.start)?,
            end: parse_event_date(&self.end)?,
            reason: self.reason.clone(),
            source: self.source,
        }))
    }
}

/// A raw leave record from an upstream export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRecordRequest {
    /// The employee's name, possibly carrying the suffix marker.
    pub name: String,
    /// Start timestamp text.
    pub start: String,
    /// End timestamp text.
    pub end: String,
    /// The leave duration text, e.g. "1 day".
    #[serde(default)]
    pub duration: String,
    /// The leave reason.
    #[serde(default)]
    pub reason: String,
    /// The upstream system the record came from.
    pub source: SourceSystem,
    /// The record's literal approval status.
    pub approval_status: String,
}

impl LeaveRecordRequest {
    /// Materializes the record, stripping the name-suffix marker so the
    /// overlay's prefix match can find the row.
    pub fn materialize(&self) -> EngineResult<Option<LeaveEvent>> {
        if !self.source.accepts(&self.approval_status) {
            return Ok(None);
        }
        Ok(Some(LeaveEvent {
            employee_name: strip_name_suffix(&self.name).to_string(),
            start: parse_event_date(&self.start)?,
            end: parse_event_date(&self.end)?,
            duration: self.duration.clone(),
            reason: self.reason.clone(),
            source: self.source,
        }))
    }
}

/// A raw overtime record from an upstream export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OvertimeRecordRequest {
    /// The employee's name.
    pub name: String,
    /// Start timestamp text.
    pub start: String,
    /// End timestamp text.
    pub end: String,
    /// The duration text, e.g. "2.5 hours".
    #[serde(default)]
    pub duration: String,
    /// The overtime reason.
    #[serde(default)]
    pub reason: String,
    /// The upstream system the record came from.
    pub source: SourceSystem,
    /// The record's literal approval status.
    pub approval_status: String,
}

impl OvertimeRecordRequest {
    /// Materializes the record into a domain event, or `None` when not
    /// approved. The duration text is carried through; it is parsed at
    /// apply time so a bad duration skips only that one event.
    pub fn materialize(&self) -> EngineResult<Option<OvertimeEvent>> {
        if !self.source.accepts(&self.approval_status) {
            return Ok(None);
        }
        Ok(Some(OvertimeEvent {
            employee_name: self.name.clone(),
            start: parse_event_date(&self.start)?,
            end: parse_event_date(&self.end)?,
            duration: self.duration.clone(),
            reason: self.reason.clone(),
            source: self.source,
        }))
    }
}

impl RunRequest {
    /// Converts the raw punch rows into domain rows.
    pub fn punch_rows(&self) -> Vec<PunchRow> {
        self.rows.iter().cloned().map(Into::into).collect()
    }

    /// Materializes every event list, discarding unapproved records and
    /// logging + dropping records whose timestamps fail to parse.
    ///
    /// Returns the batch and the number of records dropped for parse
    /// errors (unapproved records are filtered silently).
    pub fn materialize_events(&self) -> (EventBatch, usize) {
        let mut batch = EventBatch::default();
        let mut dropped = 0;

        for record in &self.trips {
            match record.materialize() {
                Ok(Some(event)) => batch.trips.push(event),
                Ok(None) => {}
                Err(error) => {
                    warn!(name = %record.name, %error, "dropping trip record");
                    dropped += 1;
                }
            }
        }
        for record in &self.leaves {
            match record.materialize() {
                Ok(Some(event)) => batch.leaves.push(event),
                Ok(None) => {}
                Err(error) => {
                    warn!(name = %record.name, %error, "dropping leave record");
                    dropped += 1;
                }
            }
        }
        for record in &self.overtime {
            match record.materialize() {
                Ok(Some(event)) => batch.overtime.push(event),
                Ok(None) => {}
                Err(error) => {
                    warn!(name = %record.name, %error, "dropping overtime record");
                    dropped += 1;
                }
            }
        }

        (batch, dropped)
    }
}
