//! Configuration types for attendance classification.
//!
//! The classifier rule thresholds and the month's rest-day calendar are
//! explicit immutable configuration objects passed into the pipeline, so
//! several months or policies can be evaluated in one process without
//! cross-contamination.

use std::collections::BTreeSet;

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};

/// Punch-rule thresholds used by the day classifier.
///
/// The defaults mirror the production rules: workdays start at 08:33,
/// end at 18:00, lateness of 30 minutes is half a day of absence, lateness
/// of 3 hours is a full day, and leaving 30 minutes early in the afternoon
/// counts as early-leave.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClassifierPolicy {
    /// Latest compliant morning punch. Arriving strictly later is late.
    pub morning_limit: NaiveTime,
    /// Normal end of the workday; the early-leave gap is measured from it.
    pub evening_limit: NaiveTime,
    /// Lateness at or above this many minutes is half a day of absence.
    pub half_day_absence_minutes: i64,
    /// Lateness at or above this many minutes is a full day of absence.
    pub full_day_absence_minutes: i64,
    /// Afternoon departures at least this many minutes before the evening
    /// limit count as early-leave.
    pub early_leave_threshold_minutes: i64,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            morning_limit: NaiveTime::from_hms_opt(8, 33, 0).expect("valid morning limit"),
            evening_limit: NaiveTime::from_hms_opt(18, 0, 0).expect("valid evening limit"),
            half_day_absence_minutes: 30,
            full_day_absence_minutes: 180,
            early_leave_threshold_minutes: 30,
        }
    }
}

impl ClassifierPolicy {
    /// Lateness threshold for half-day absence.
    pub fn half_day_absence(&self) -> Duration {
        Duration::minutes(self.half_day_absence_minutes)
    }

    /// Lateness threshold for full-day absence.
    pub fn full_day_absence(&self) -> Duration {
        Duration::minutes(self.full_day_absence_minutes)
    }

    /// Early-departure threshold.
    pub fn early_leave_threshold(&self) -> Duration {
        Duration::minutes(self.early_leave_threshold_minutes)
    }
}

/// Raw calendar file structure, validated into a [`HolidayCalendar`].
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// The active year.
    pub year: i32,
    /// The active month, 1-12.
    pub month: u32,
    /// Days of the month designated as rest days.
    pub rest_days: Vec<u32>,
}

/// The set of rest days in the active month.
///
/// Immutable once a classification pass has begun; the pipeline takes it
/// by shared reference and never writes to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    year: i32,
    month: u32,
    days_in_month: u32,
    rest_days: BTreeSet<u32>,
}

impl HolidayCalendar {
    /// Creates a validated calendar.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCalendar`] if the month is out of range
    /// or any rest day falls outside the month.
    pub fn new(year: i32, month: u32, rest_days: impl IntoIterator<Item = u32>) -> EngineResult<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::InvalidCalendar {
                message: format!("month {}-{:02} is not a valid calendar month", year, month),
            }
        })?;

        let days_in_month = days_in_month_of(first);
        let rest_days: BTreeSet<u32> = rest_days.into_iter().collect();

        if let Some(&bad) = rest_days.iter().find(|&&d| d == 0 || d > days_in_month) {
            return Err(EngineError::InvalidCalendar {
                message: format!(
                    "rest day {} is outside {}-{:02} (1..={})",
                    bad, year, month, days_in_month
                ),
            });
        }

        Ok(Self {
            year,
            month,
            days_in_month,
            rest_days,
        })
    }

    /// Builds a calendar from a deserialized [`CalendarConfig`].
    pub fn from_config(config: &CalendarConfig) -> EngineResult<Self> {
        Self::new(config.year, config.month, config.rest_days.iter().copied())
    }

    /// The active year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The active month, 1-12.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Number of days in the active month.
    pub fn days_in_month(&self) -> u32 {
        self.days_in_month
    }

    /// Returns true if the given day of month is a rest day.
    pub fn is_rest_day(&self, day: u32) -> bool {
        self.rest_days.contains(&day)
    }

    /// Number of rest days in the month.
    pub fn rest_day_count(&self) -> u32 {
        self.rest_days.len() as u32
    }

    /// Days in the month minus rest days.
    pub fn expected_working_days(&self) -> u32 {
        self.days_in_month - self.rest_day_count()
    }
}

fn days_in_month_of(first: NaiveDate) -> u32 {
    let (next_year, next_month) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("valid first of next month")
        .pred_opt()
        .expect("valid last day of month")
        .day()
}
