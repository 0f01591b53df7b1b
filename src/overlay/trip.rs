//! Business-trip overlay.
//!
//! A trip is an authoritative override: for every day it covers, the day's
//! status is replaced entirely, discarding the base classification and any
//! prior overlay. Employee rows are resolved by exact name match.

use tracing::debug;

use crate::config::HolidayCalendar;
use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSheet, TripEvent};

/// Applies one trip event to the sheet, replacing the status of every day
/// in the event's range. Returns the number of days overwritten.
///
/// The day range is the event's day-of-month pair; an event whose end date
/// falls in a later month yields an empty range and touches nothing.
///
/// # Errors
///
/// Returns [`EngineError::EmployeeNotFound`] when no row matches the
/// event's employee name exactly.
pub fn apply_trip_event(
    sheet: &mut AttendanceSheet,
    event: &TripEvent,
    calendar: &HolidayCalendar,
) -> EngineResult<u32> {
    let row = sheet
        .row_by_name_mut(&event.employee_name)
        .ok_or_else(|| EngineError::EmployeeNotFound {
            name: event.employee_name.clone(),
        })?;

    let (start_day, end_day) = event.day_range();
    let end_day = end_day.min(calendar.days_in_month());

    let mut applied = 0;
    for day in start_day..=end_day {
        if let Some(record) = row.day_mut(day) {
            record.status.apply_trip(event.reason.clone());
            applied += 1;
        }
    }

    debug!(
        employee = %event.employee_name,
        start_day,
        end_day,
        applied,
        "applied trip override"
    );
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayClassification, DayStatus, Employee, EmployeeRow, SourceSystem};
    use chrono::{NaiveDate, NaiveTime};

    fn calendar() -> HolidayCalendar {
        HolidayCalendar::new(2025, 5, [4, 11]).unwrap()
    }

    fn sheet_for(name: &str) -> AttendanceSheet {
        let mut sheet = AttendanceSheet::new();
        sheet.push(EmployeeRow::blank(Employee::named(name), 31));
        sheet
    }

    fn trip(name: &str, start_day: u32, end_day: u32, reason: &str) -> TripEvent {
        TripEvent {
            employee_name: name.to_string(),
            start: NaiveDate::from_ymd_opt(2025, 5, start_day).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 5, end_day).unwrap(),
            reason: reason.to_string(),
            source: SourceSystem::OriginA,
        }
    }

    #[test]
    fn test_trip_overwrites_every_day_in_range() {
        let mut sheet = sheet_for("Dana Reyes");
        let applied =
            apply_trip_event(&mut sheet, &trip("Dana Reyes", 7, 9, "client visit"), &calendar())
                .unwrap();

        assert_eq!(applied, 3);
        let row = &sheet.rows()[0];
        for day in 7..=9 {
            assert_eq!(
                row.day(day).unwrap().status.render(),
                "business-trip(client visit)"
            );
        }
        assert_eq!(row.day(6).unwrap().status.render(), "");
        assert_eq!(row.day(10).unwrap().status.render(), "");
    }

    #[test]
    fn test_trip_discards_prior_classification_and_overlays() {
        let mut sheet = sheet_for("Dana Reyes");
        {
            let record = sheet.rows_mut()[0].day_mut(7).unwrap();
            record.status = DayStatus::base(DayClassification::Flagged {
                late: true,
                early_leave: false,
                first: NaiveTime::from_hms_opt(8, 40, 0).unwrap(),
                last: NaiveTime::from_hms_opt(18, 5, 0).unwrap(),
            });
            record.status.push_leave(SourceSystem::OriginB, "0.5 day", "errand");
        }

        apply_trip_event(&mut sheet, &trip("Dana Reyes", 7, 7, "site audit"), &calendar())
            .unwrap();

        assert_eq!(
            sheet.rows()[0].day(7).unwrap().status.render(),
            "business-trip(site audit)"
        );
    }

    #[test]
    fn test_trip_is_idempotent_by_replacement() {
        let mut once = sheet_for("Dana Reyes");
        let event = trip("Dana Reyes", 7, 9, "client visit");
        apply_trip_event(&mut once, &event, &calendar()).unwrap();

        let mut twice = once.clone();
        apply_trip_event(&mut twice, &event, &calendar()).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_trip_requires_exact_name_match() {
        let mut sheet = sheet_for("Dana Reyes-Ito");
        let result = apply_trip_event(&mut sheet, &trip("Dana Reyes", 7, 7, "x"), &calendar());

        match result {
            Err(EngineError::EmployeeNotFound { name }) => assert_eq!(name, "Dana Reyes"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_trip_ending_in_next_month_touches_nothing() {
        let mut sheet = sheet_for("Dana Reyes");
        let event = TripEvent {
            employee_name: "Dana Reyes".to_string(),
            start: NaiveDate::from_ymd_opt(2025, 5, 30).unwrap(),
            end: NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            reason: "expo".to_string(),
            source: SourceSystem::OriginB,
        };

        let applied = apply_trip_event(&mut sheet, &event, &calendar()).unwrap();
        assert_eq!(applied, 0);
        assert!(sheet.rows()[0].days.iter().all(|r| r.status.render().is_empty()));
    }

    #[test]
    fn test_single_day_trip() {
        let mut sheet = sheet_for("Dana Reyes");
        let applied =
            apply_trip_event(&mut sheet, &trip("Dana Reyes", 15, 15, "training"), &calendar())
                .unwrap();
        assert_eq!(applied, 1);
    }
}
