//! Monthly aggregate model.
//!
//! A pure projection of one employee's month of final day statuses into
//! category counts and overtime totals. Recomputed from scratch each run;
//! never updated incrementally and never treated as a source of truth.

use serde::{Deserialize, Serialize};

use super::event::SourceSystem;

/// Per-employee monthly counters derived from the final day statuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    /// The employee the counters belong to.
    pub employee_name: String,
    /// Days with a compliant first and last punch.
    pub normal: u32,
    /// Days arriving after the morning limit.
    pub late: u32,
    /// Days leaving early in the afternoon.
    pub early_leave: u32,
    /// Workdays with fewer than two punches.
    pub missing_punch: u32,
    /// Days with a half or full day of absence.
    pub absent: u32,
    /// Days covered by a business-trip override.
    pub business_trip: u32,
    /// Days holding at least one leave note, rest days excluded.
    pub leave: u32,
    /// Overtime hours recorded by the first upstream system.
    pub overtime_origin_a_hours: f64,
    /// Overtime hours recorded by the second upstream system.
    pub overtime_origin_b_hours: f64,
    /// Combined overtime hours across both systems.
    pub overtime_total_hours: f64,
    /// Days in the month minus rest days. Constant across employees for a
    /// given month.
    pub expected_working_days: u32,
    /// Expected working days minus the missing-punch count.
    pub actual_attendance_days: u32,
}

impl MonthlyAggregate {
    /// Overtime hours for the given source system.
    pub fn overtime_hours(&self, source: SourceSystem) -> f64 {
        match source {
            SourceSystem::OriginA => self.overtime_origin_a_hours,
            SourceSystem::OriginB => self.overtime_origin_b_hours,
        }
    }
}
