//! Overtime overlay.
//!
//! An overtime event appends a note to the day the overtime *started*.
//! The event carries an end date too, but it is deliberately unused: the
//! production system only ever annotated the start day, so overnight and
//! multi-day overtime is under-applied. Preserved as-is; see DESIGN.md.

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSheet, OvertimeEvent, parse_overtime_hours};

/// Applies one overtime event to the sheet, appending an overtime note to
/// the event's start day. Returns the number of days annotated (0 or 1;
/// 0 when the start day falls outside the sheet's month).
///
/// # Errors
///
/// Returns [`EngineError::InvalidDuration`] when the duration text cannot
/// be parsed to hours, and [`EngineError::EmployeeNotFound`] when no row
/// matches the event's employee name exactly.
pub fn apply_overtime_event(
    sheet: &mut AttendanceSheet,
    event: &OvertimeEvent,
) -> EngineResult<u32> {
    let hours = parse_overtime_hours(&event.duration)?;

    let row = sheet
        .row_by_name_mut(&event.employee_name)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            name: event.employee_name.clone(),
        })?;

    let day = event.start_day();
    let applied = match row.day_mut(day) {
        Some(record) => {
            record.status.push_overtime(event.source, hours);
            1
        }
        None => 0,
    };

    debug!(
        employee = %event.employee_name,
        day,
        hours,
        applied,
        "appended overtime note"
    );
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayClassification, DayStatus, Employee, EmployeeRow, SourceSystem};
    use chrono::{NaiveDate, NaiveTime};

    fn sheet_for(name: &str) -> AttendanceSheet {
        let mut sheet = AttendanceSheet::new();
        sheet.push(EmployeeRow::blank(Employee::named(name), 31));
        sheet
    }

    fn overtime(name: &str, start_day: u32, end_day: u32, duration: &str) -> OvertimeEvent {
        OvertimeEvent {
            employee_name: name.to_string(),
            start: NaiveDate::from_ymd_opt(2025, 5, start_day).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 5, end_day).unwrap(),
            duration: duration.to_string(),
            reason: "release window".to_string(),
            source: SourceSystem::OriginB,
        }
    }

    #[test]
    fn test_overtime_appends_to_existing_status() {
        let mut sheet = sheet_for("Dana Reyes");
        sheet.rows_mut()[0].day_mut(20).unwrap().status =
            DayStatus::base(DayClassification::Normal {
                first: NaiveTime::from_hms_opt(8, 20, 0).unwrap(),
                last: NaiveTime::from_hms_opt(18, 10, 0).unwrap(),
            });

        apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 20, 20, "2.5 hours")).unwrap();

        assert_eq!(
            sheet.rows()[0].day(20).unwrap().status.render(),
            "normal(08:20, 18:10) + origin-Bovertime(2.5h)"
        );
    }

    #[test]
    fn test_overtime_on_empty_day_sets_directly() {
        let mut sheet = sheet_for("Dana Reyes");
        apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 4, 4, "3h")).unwrap();

        assert_eq!(
            sheet.rows()[0].day(4).unwrap().status.render(),
            "origin-Bovertime(3h)"
        );
    }

    #[test]
    fn test_overtime_only_touches_start_day() {
        // End day is parsed but never applied; a spanning event annotates
        // the start day alone.
        let mut sheet = sheet_for("Dana Reyes");
        let applied =
            apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 20, 21, "6 hours")).unwrap();

        assert_eq!(applied, 1);
        assert!(
            sheet.rows()[0]
                .day(20)
                .unwrap()
                .status
                .render()
                .contains("overtime")
        );
        assert!(sheet.rows()[0].day(21).unwrap().status.render().is_empty());
    }

    #[test]
    fn test_unparseable_duration_is_an_error() {
        let mut sheet = sheet_for("Dana Reyes");
        let result = apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 20, 20, "a while"));

        match result {
            Err(EngineError::InvalidDuration { value }) => assert_eq!(value, "a while"),
            other => panic!("Expected InvalidDuration, got {:?}", other),
        }
        // Nothing was written.
        assert!(sheet.rows()[0].day(20).unwrap().status.render().is_empty());
    }

    #[test]
    fn test_overtime_requires_exact_name_match() {
        let mut sheet = sheet_for("Dana Reyes-Ito");
        let result = apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 20, 20, "2h"));

        assert!(matches!(result, Err(EngineError::EmployeeNotFound { .. })));
    }

    #[test]
    fn test_start_day_outside_sheet_applies_nothing() {
        let mut sheet = AttendanceSheet::new();
        sheet.push(EmployeeRow::blank(Employee::named("Dana Reyes"), 28));

        let applied =
            apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 30, 30, "2h")).unwrap();
        assert_eq!(applied, 0);
    }

    #[test]
    fn test_two_events_on_same_day_accumulate() {
        let mut sheet = sheet_for("Dana Reyes");
        apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 20, 20, "2h")).unwrap();
        apply_overtime_event(&mut sheet, &overtime("Dana Reyes", 20, 20, "1.5 hours")).unwrap();

        let status = &sheet.rows()[0].day(20).unwrap().status;
        assert_eq!(status.overtime_hours(SourceSystem::OriginB), 3.5);
        assert_eq!(
            status.render(),
            "origin-Bovertime(2h) + origin-Bovertime(1.5h)"
        );
    }
}
