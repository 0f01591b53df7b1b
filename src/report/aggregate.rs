//! Monthly aggregation.
//!
//! Scans an employee's final day statuses and produces the per-category
//! counts and overtime totals. Counts are additive across categories: a
//! single day can be late and hold a leave note and contribute to both
//! counters. Leave alone is gated on the rest-day flag.

use crate::config::HolidayCalendar;
use crate::models::{EmployeeRow, MonthlyAggregate, SourceSystem};

/// Aggregates one employee's month.
///
/// Only the days the row actually defines are scanned. Expected working
/// days is a month-level constant (days in month minus rest days); actual
/// attendance is expected minus the missing-punch count.
pub fn aggregate_month(row: &EmployeeRow, calendar: &HolidayCalendar) -> MonthlyAggregate {
    let mut aggregate = MonthlyAggregate {
        employee_name: row.employee.name.clone(),
        ..Default::default()
    };

    for record in &row.days {
        let categories = record.status.categories();

        if categories.normal {
            aggregate.normal += 1;
        }
        if categories.late {
            aggregate.late += 1;
        }
        if categories.early_leave {
            aggregate.early_leave += 1;
        }
        if categories.missing_punch {
            aggregate.missing_punch += 1;
        }
        if categories.absent {
            aggregate.absent += 1;
        }
        if categories.business_trip {
            aggregate.business_trip += 1;
        }
        // Leave is the one category that skips rest days.
        if categories.leave && !calendar.is_rest_day(record.day) {
            aggregate.leave += 1;
        }

        aggregate.overtime_origin_a_hours += record.status.overtime_hours(SourceSystem::OriginA);
        aggregate.overtime_origin_b_hours += record.status.overtime_hours(SourceSystem::OriginB);
    }

    aggregate.overtime_total_hours =
        aggregate.overtime_origin_a_hours + aggregate.overtime_origin_b_hours;
    aggregate.expected_working_days = calendar.expected_working_days();
    aggregate.actual_attendance_days = aggregate
        .expected_working_days
        .saturating_sub(aggregate.missing_punch);

    aggregate
}

/// Aggregates every row of a sheet, in sheet order.
pub fn aggregate_sheet(
    rows: &[EmployeeRow],
    calendar: &HolidayCalendar,
) -> Vec<MonthlyAggregate> {
    rows.iter().map(|row| aggregate_month(row, calendar)).collect()
}
