//! The in-memory attendance sheet.
//!
//! One wide row per employee, one [`DayRecord`] per calendar day. Records
//! are never removed once the sheet is built: the classifier writes the base
//! status and the overlay stages overwrite or append to it in place.

use serde::{Deserialize, Serialize};

use super::day_status::DayStatus;
use super::employee::Employee;

/// The status of one employee-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Day of month, 1-based.
    pub day: u32,
    /// The current status for that day.
    pub status: DayStatus,
}

/// One employee's row: identity attributes plus one record per day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// The employee the row belongs to.
    pub employee: Employee,
    /// Day records, ordered by day of month starting at 1.
    pub days: Vec<DayRecord>,
}

impl EmployeeRow {
    /// Creates a row with an empty status for every day in the month.
    pub fn blank(employee: Employee, days_in_month: u32) -> Self {
        let days = (1..=days_in_month)
            .map(|day| DayRecord {
                day,
                status: DayStatus::empty(),
            })
            .collect();
        Self { employee, days }
    }

    /// Returns the record for a 1-based day of month, if the row has one.
    pub fn day(&self, day: u32) -> Option<&DayRecord> {
        self.days.get(day.checked_sub(1)? as usize)
    }

    /// Returns a mutable record for a 1-based day of month.
    pub fn day_mut(&mut self, day: u32) -> Option<&mut DayRecord> {
        self.days.get_mut(day.checked_sub(1)? as usize)
    }
}

/// The full month's attendance state: one row per employee, in sheet order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttendanceSheet {
    rows: Vec<EmployeeRow>,
}

impl AttendanceSheet {
    /// Creates an empty sheet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row to the sheet.
    pub fn push(&mut self, row: EmployeeRow) {
        self.rows.push(row);
    }

    /// All rows in sheet order.
    pub fn rows(&self) -> &[EmployeeRow] {
        &self.rows
    }

    /// All rows, mutably.
    pub fn rows_mut(&mut self) -> &mut [EmployeeRow] {
        &mut self.rows
    }

    /// Number of employee rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the sheet has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Looks up a row by exact employee name. Used by the trip and
    /// overtime overlays.
    pub fn row_by_name_mut(&mut self, name: &str) -> Option<&mut EmployeeRow> {
        self.rows.iter_mut().find(|row| row.employee.name == name)
    }

    /// Looks up the first row whose employee name starts with the given
    /// prefix. Used by the leave overlay to tolerate name-suffix variants.
    pub fn row_by_name_prefix_mut(&mut self, prefix: &str) -> Option<&mut EmployeeRow> {
        self.rows
            .iter_mut()
            .find(|row| row.employee.name.starts_with(prefix))
    }
}
