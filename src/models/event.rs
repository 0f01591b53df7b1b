//! Approved-event models and their parsing helpers.
//!
//! This module defines the three event variants that overlay a month of
//! base classifications: business trips, leave, and overtime. Events arrive
//! from two upstream systems with free-text timestamps and durations; the
//! helpers here normalize those fields and enforce the per-source approval
//! filter so only approved records reach the merge pipeline.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Employee-name suffix appended by the leave export for seconded staff.
/// Stripped at ingestion; the stripped name is then prefix-matched.
pub const NAME_SUFFIX_MARKER: &str = "CDTL";

/// The upstream system an event record originated from.
///
/// The display form of each variant is part of the persisted wire format:
/// leave notes render as `<source>-leave(..)` and overtime notes as
/// `<source>overtime(..h)`, and the aggregator keys its per-source overtime
/// sums on the same labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceSystem {
    /// The first upstream approval system.
    #[serde(rename = "origin-A")]
    OriginA,
    /// The second upstream approval system.
    #[serde(rename = "origin-B")]
    OriginB,
}

impl SourceSystem {
    /// All known source systems.
    pub const ALL: [SourceSystem; 2] = [SourceSystem::OriginA, SourceSystem::OriginB];

    /// The literal approval-status string this source uses for accepted
    /// records. Each upstream exports its own spelling.
    pub fn approved_status(&self) -> &'static str {
        match self {
            SourceSystem::OriginA => "approved",
            SourceSystem::OriginB => "approval-passed",
        }
    }

    /// Returns true if the given approval-status text marks an accepted
    /// record for this source.
    pub fn accepts(&self, status: &str) -> bool {
        status.trim() == self.approved_status()
    }
}

impl std::fmt::Display for SourceSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceSystem::OriginA => write!(f, "origin-A"),
            SourceSystem::OriginB => write!(f, "origin-B"),
        }
    }
}

/// An approved business-trip event.
///
/// Applied by the trip overlay as a destructive override of every day in
/// `[start, end]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripEvent {
    /// The employee the trip belongs to (matched exactly).
    pub employee_name: String,
    /// First day of the trip.
    pub start: NaiveDate,
    /// Last day of the trip, inclusive.
    pub end: NaiveDate,
    /// The trip reason, carried into the day status verbatim.
    pub reason: String,
    /// The upstream system the record came from.
    pub source: SourceSystem,
}

/// An approved leave event.
///
/// Applied by the leave overlay as an appended note on every day in
/// `[start, end]`, resolved by employee-name prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveEvent {
    /// The employee the leave belongs to (matched by prefix).
    pub employee_name: String,
    /// First day of the leave.
    pub start: NaiveDate,
    /// Last day of the leave, inclusive.
    pub end: NaiveDate,
    /// The leave duration text, e.g. "1 day" (carried verbatim).
    pub duration: String,
    /// The leave reason, carried into the note verbatim.
    pub reason: String,
    /// The upstream system the record came from.
    pub source: SourceSystem,
}

/// An approved overtime event.
///
/// Applied by the overtime overlay to the start day only. The end date is
/// parsed and kept, but the overlay does not use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeEvent {
    /// The employee the overtime belongs to (matched exactly).
    pub employee_name: String,
    /// The day the overtime started.
    pub start: NaiveDate,
    /// The day the overtime ended. Unused by the overlay.
    pub end: NaiveDate,
    /// The duration text, e.g. "2.5 hours"; parsed to hours at apply time.
    pub duration: String,
    /// The overtime reason text.
    pub reason: String,
    /// The upstream system the record came from.
    pub source: SourceSystem,
}

impl TripEvent {
    /// Day-of-month range covered by this trip.
    pub fn day_range(&self) -> (u32, u32) {
        (self.start.day(), self.end.day())
    }
}

impl LeaveEvent {
    /// Day-of-month range covered by this leave.
    pub fn day_range(&self) -> (u32, u32) {
        (self.start.day(), self.end.day())
    }
}

impl OvertimeEvent {
    /// Day-of-month the overtime note is applied to.
    pub fn start_day(&self) -> u32 {
        self.start.day()
    }
}

/// Parses the date part of a free-text event timestamp.
///
/// Upstream exports timestamps as `YYYY-MM-DD` optionally followed by a
/// time or a morning/afternoon marker. Only the leading date token is used.
///
/// # Example
///
/// ```
/// use attendance_engine::models::parse_event_date;
/// use chrono::NaiveDate;
///
/// let date = parse_event_date("2025-05-13 08:30").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2025, 5, 13).unwrap());
/// ```
pub fn parse_event_date(text: &str) -> EngineResult<NaiveDate> {
    let date_part = text
        .split_whitespace()
        .next()
        .ok_or_else(|| EngineError::InvalidTimestamp {
            value: text.to_string(),
        })?;

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| EngineError::InvalidTimestamp {
        value: text.to_string(),
    })
}

/// Parses an overtime duration text into hours.
///
/// Accepts a number with an optional `hours`/`hour`/`h` unit suffix.
///
/// # Example
///
/// ```
/// use attendance_engine::models::parse_overtime_hours;
///
/// assert_eq!(parse_overtime_hours("2.5 hours").unwrap(), 2.5);
/// assert_eq!(parse_overtime_hours("3h").unwrap(), 3.0);
/// ```
pub fn parse_overtime_hours(text: &str) -> EngineResult<f64> {
    let trimmed = text.trim();
    let without_unit = trimmed
        .strip_suffix("hours")
        .or_else(|| trimmed.strip_suffix("hour"))
        .or_else(|| trimmed.strip_suffix('h'))
        .unwrap_or(trimmed)
        .trim();

    without_unit
        .parse::<f64>()
        .map_err(|_| EngineError::InvalidDuration {
            value: text.to_string(),
        })
}

/// Strips the seconded-staff suffix marker from an employee name.
///
/// Leave exports tag some names with a trailing marker; the overlay matches
/// the stripped name as a prefix against the attendance sheet.
pub fn strip_name_suffix(name: &str) -> &str {
    name.strip_suffix(NAME_SUFFIX_MARKER).unwrap_or(name)
}
