//! Display formatting for report cells.
//!
//! Attaches presentation icons to a day's rendered status at report time.
//! Works on a copy of the rendered string and never mutates stored state.

use crate::config::HolidayCalendar;
use crate::models::{DayCategories, DayStatus};

const REST_DAY_ICON: &str = "🏠";
const NORMAL_ICON: &str = "✅";
const LATE_ICON: &str = "⏰";
const EARLY_LEAVE_ICON: &str = "⚡";
const MISSING_PUNCH_ICON: &str = "❌";
const ABSENT_ICON: &str = "⛔";
const BUSINESS_TRIP_ICON: &str = "🚗";
const LEAVE_ICON: &str = "📝";

fn category_icons(categories: &DayCategories) -> String {
    let mut icons = String::new();
    if categories.normal {
        icons.push_str(NORMAL_ICON);
    }
    if categories.late {
        icons.push_str(LATE_ICON);
    }
    if categories.early_leave {
        icons.push_str(EARLY_LEAVE_ICON);
    }
    if categories.missing_punch {
        icons.push_str(MISSING_PUNCH_ICON);
    }
    if categories.absent {
        icons.push_str(ABSENT_ICON);
    }
    if categories.business_trip {
        icons.push_str(BUSINESS_TRIP_ICON);
    }
    if categories.leave {
        icons.push_str(LEAVE_ICON);
    }
    icons
}

/// Formats one day's status for the report.
///
/// One icon is added per category present, independent of how many notes of
/// that category the day holds. Rest days are marked and get their own line
/// layout:
///
/// - rest day: `"<icons> rest-day\n<rendered status>"`
/// - workday: `"<icons> <rendered status>"`
/// - empty status: empty result
///
/// # Example
///
/// ```
/// use attendance_engine::config::HolidayCalendar;
/// use attendance_engine::models::{DayClassification, DayStatus};
/// use attendance_engine::report::format_day_status;
/// use chrono::NaiveTime;
///
/// let calendar = HolidayCalendar::new(2025, 5, [4]).unwrap();
/// let status = DayStatus::base(DayClassification::Normal {
///     first: NaiveTime::from_hms_opt(8, 20, 0).unwrap(),
///     last: NaiveTime::from_hms_opt(18, 10, 0).unwrap(),
/// });
/// assert_eq!(
///     format_day_status(&status, 5, &calendar),
///     "✅ normal(08:20, 18:10)"
/// );
/// ```
pub fn format_day_status(status: &DayStatus, day: u32, calendar: &HolidayCalendar) -> String {
    let rendered = status.render();
    if rendered.is_empty() {
        return String::new();
    }

    let is_rest_day = calendar.is_rest_day(day);
    let mut icons = String::new();
    if is_rest_day {
        icons.push_str(REST_DAY_ICON);
    }
    icons.push_str(&category_icons(&status.categories()));

    if icons.is_empty() {
        return rendered;
    }

    if is_rest_day {
        format!("{} rest-day\n{}", icons, rendered)
    } else {
        format!("{} {}", icons, rendered)
    }
}
