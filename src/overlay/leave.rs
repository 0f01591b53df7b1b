//! Leave overlay.
//!
//! A leave event appends a note to every day it covers, on top of whatever
//! status is present at the moment the overlay runs. Rows are resolved by
//! employee-name *prefix*: the leave export tags some names with a suffix
//! marker that is stripped at ingestion, so the stripped name must still
//! find its row. Trip and overtime resolve exactly; this one does not.

use tracing::debug;

use crate::config::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSheet, LeaveEvent};

/// Applies one leave event to the sheet, appending a leave note to every
/// day in the event's range. Returns the number of days annotated.
///
/// Strictly additive: applying the same event twice appends two notes.
///
/// # Errors
///
/// Returns [`EngineError::EmployeeNotFound`] when no row's employee name
/// starts with the event's employee name.
pub fn apply_leave_event(
    sheet: &mut AttendanceSheet,
    event: &LeaveEvent,
    calendar: &HolidayCalendar,
) -> EngineResult<u32> {
    let row = sheet
        .row_by_name_prefix_mut(&event.employee_name)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            name: event.employee_name.clone(),
        })?;

    let (start_day, end_day) = event.day_range();
    let end_day = end_day.min(calendar.days_in_month());

    let mut applied = 0;
    for day in start_day..=end_day {
        if let Some(record) = row.day_mut(day) {
            record
                .status
                .push_leave(event.source, event.duration.clone(), event.reason.clone());
            applied += 1;
        }
    }

    debug!(
        employee = %event.employee_name,
        matched = %row.employee.name,
        start_day,
        end_day,
        applied,
        "appended leave notes"
    );
    Ok(applied)
}
