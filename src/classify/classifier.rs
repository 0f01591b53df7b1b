//! Single-day classification rules.
//!
//! Turns one employee-day's raw punch cell into a base classification.
//! Rest days are passed through: with no punches the day stays empty, with
//! punches the raw text is carried verbatim. Workdays need at least two
//! punches; the earliest and latest punches are then measured against the
//! policy's morning and evening limits.

use chrono::{Duration, Timelike};

use crate::config::ClassifierPolicy;
use crate::models::DayClassification;

use super::punches::extract_punches;

/// Afternoon boundary: early-leave is only ever assessed for departures
/// from this hour onward.
const AFTERNOON_HOUR: u32 = 12;

/// Classifies one employee-day from its raw punch cell.
///
/// The absence checks take precedence, in order: lateness at or above the
/// full-day threshold wins, then lateness at or above the half-day
/// threshold. Only when neither fires are the late / early-leave flags
/// collected. Arriving exactly at the morning limit is not late.
///
/// # Example
///
/// ```
/// use attendance_engine::classify::classify_day;
/// use attendance_engine::config::ClassifierPolicy;
///
/// let policy = ClassifierPolicy::default();
/// let classification = classify_day("08:20 18:10", false, &policy);
/// assert_eq!(classification.render(), "normal(08:20, 18:10)");
/// ```
pub fn classify_day(raw: &str, is_rest_day: bool, policy: &ClassifierPolicy) -> DayClassification {
    let punches = extract_punches(raw);
    let has_text = !raw.trim().is_empty();

    if is_rest_day {
        if punches.is_empty() {
            return DayClassification::Empty;
        }
        return DayClassification::RestDayRaw {
            raw: raw.to_string(),
        };
    }

    if punches.len() < 2 {
        return DayClassification::MissingPunch {
            raw: has_text.then(|| raw.to_string()),
        };
    }

    let first = punches
        .iter()
        .min()
        .copied()
        .expect("at least two punches");
    let last = punches
        .iter()
        .max()
        .copied()
        .expect("at least two punches");

    let lateness = if first > policy.morning_limit {
        first - policy.morning_limit
    } else {
        Duration::zero()
    };

    let afternoon = last.hour() >= AFTERNOON_HOUR;
    let early_gap = if afternoon && last < policy.evening_limit {
        policy.evening_limit - last
    } else {
        Duration::zero()
    };

    if lateness >= policy.full_day_absence() {
        return DayClassification::AbsentFull { first, last };
    }
    if lateness >= policy.half_day_absence() {
        return DayClassification::AbsentHalf { first, last };
    }

    let late = lateness > Duration::zero();
    let early_leave = afternoon && early_gap >= policy.early_leave_threshold();

    if late || early_leave {
        DayClassification::Flagged {
            late,
            early_leave,
            first,
            last,
        }
    } else {
        DayClassification::Normal { first, last }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn policy() -> ClassifierPolicy {
        ClassifierPolicy::default()
    }

    // =========================================================================
    // Rest days
    // =========================================================================

    #[test]
    fn test_rest_day_without_punches_is_empty() {
        assert_eq!(classify_day("", true, &policy()), DayClassification::Empty);
        assert_eq!(
            classify_day("device offline", true, &policy()),
            DayClassification::Empty
        );
    }

    #[test]
    fn test_rest_day_with_punches_carries_raw_text() {
        assert_eq!(
            classify_day("08:30 18:05", true, &policy()),
            DayClassification::RestDayRaw {
                raw: "08:30 18:05".to_string()
            }
        );
    }

    // =========================================================================
    // Missing punches
    // =========================================================================

    #[test]
    fn test_workday_empty_cell_is_missing_punch() {
        assert_eq!(
            classify_day("", false, &policy()),
            DayClassification::MissingPunch { raw: None }
        );
    }

    #[test]
    fn test_workday_single_punch_is_missing_punch_with_raw() {
        assert_eq!(
            classify_day("09:10", false, &policy()),
            DayClassification::MissingPunch {
                raw: Some("09:10".to_string())
            }
        );
    }

    #[test]
    fn test_workday_text_without_punches_is_missing_punch_with_raw() {
        assert_eq!(
            classify_day("device offline", false, &policy()),
            DayClassification::MissingPunch {
                raw: Some("device offline".to_string())
            }
        );
    }

    // =========================================================================
    // Boundary: morning limit
    // =========================================================================

    #[test]
    fn test_punch_exactly_at_morning_limit_is_not_late() {
        assert_eq!(
            classify_day("08:33 18:00", false, &policy()),
            DayClassification::Normal {
                first: chrono::NaiveTime::from_hms_opt(8, 33, 0).unwrap(),
                last: chrono::NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_one_minute_past_limit_is_late() {
        match classify_day("08:34 18:00", false, &policy()) {
            DayClassification::Flagged {
                late, early_leave, ..
            } => {
                assert!(late);
                assert!(!early_leave);
            }
            other => panic!("Expected Flagged, got {:?}", other),
        }
    }

    // =========================================================================
    // Absence thresholds
    // =========================================================================

    #[test]
    fn test_lateness_at_half_day_threshold_is_absent_half() {
        // 09:03 is exactly 30 minutes past 08:33.
        match classify_day("09:03 18:00", false, &policy()) {
            DayClassification::AbsentHalf { .. } => {}
            other => panic!("Expected AbsentHalf, got {:?}", other),
        }
    }

    #[test]
    fn test_lateness_of_37_minutes_is_absent_half_not_late() {
        let classification = classify_day("09:10 17:00", false, &policy());
        assert_eq!(
            classification.render(),
            "absent-half(0.5 day)(09:10, 17:00)"
        );
    }

    #[test]
    fn test_lateness_just_under_full_day_is_absent_half() {
        // 11:32 is 2h59m past 08:33.
        match classify_day("11:32 18:00", false, &policy()) {
            DayClassification::AbsentHalf { .. } => {}
            other => panic!("Expected AbsentHalf, got {:?}", other),
        }
    }

    #[test]
    fn test_lateness_at_full_day_threshold_is_absent_full() {
        // 11:33 is exactly 3 hours past 08:33.
        match classify_day("11:33 18:00", false, &policy()) {
            DayClassification::AbsentFull { .. } => {}
            other => panic!("Expected AbsentFull, got {:?}", other),
        }
    }

    #[test]
    fn test_absent_full_overrides_early_leave() {
        // Very late AND leaves early: absence wins, no early-leave flag.
        let classification = classify_day("12:00 14:00", false, &policy());
        assert_eq!(
            classification.render(),
            "absent-full(1 day)(12:00, 14:00)"
        );
    }

    #[test]
    fn test_absent_half_overrides_early_leave() {
        let classification = classify_day("09:10 15:00", false, &policy());
        assert_eq!(
            classification.render(),
            "absent-half(0.5 day)(09:10, 15:00)"
        );
    }

    // =========================================================================
    // Early-leave
    // =========================================================================

    #[test]
    fn test_early_leave_at_threshold() {
        // 17:30 is exactly 30 minutes before 18:00.
        match classify_day("08:20 17:30", false, &policy()) {
            DayClassification::Flagged {
                late, early_leave, ..
            } => {
                assert!(!late);
                assert!(early_leave);
            }
            other => panic!("Expected Flagged, got {:?}", other),
        }
    }

    #[test]
    fn test_gap_under_threshold_is_not_early_leave() {
        assert_eq!(
            classify_day("08:20 17:31", false, &policy()),
            DayClassification::Normal {
                first: chrono::NaiveTime::from_hms_opt(8, 20, 0).unwrap(),
                last: chrono::NaiveTime::from_hms_opt(17, 31, 0).unwrap(),
            }
        );
    }

    #[test]
    fn test_morning_departure_is_never_early_leave() {
        // Last punch before noon: early-leave is not assessed at all.
        match classify_day("08:20 11:59", false, &policy()) {
            DayClassification::Normal { .. } => {}
            other => panic!("Expected Normal, got {:?}", other),
        }
    }

    #[test]
    fn test_late_and_early_leave_combine() {
        let classification = classify_day("08:40 17:20", false, &policy());
        assert_eq!(classification.render(), "late+early-leave(08:40, 17:20)");
    }

    // =========================================================================
    // Punch selection
    // =========================================================================

    #[test]
    fn test_uses_earliest_and_latest_of_many_punches() {
        let classification = classify_day("12:01 08:20 18:10 13:02", false, &policy());
        assert_eq!(classification.render(), "normal(08:20, 18:10)");
    }

    #[test]
    fn test_end_to_end_normal_example() {
        let classification = classify_day("08:20 18:10", false, &policy());
        assert_eq!(classification.render(), "normal(08:20, 18:10)");
    }

    // =========================================================================
    // Properties
    // =========================================================================

    proptest! {
        /// Any workday cell with fewer than two parseable punches is
        /// missing-punch, whatever else the cell contains.
        #[test]
        fn prop_fewer_than_two_punches_is_missing_punch(
            h in 0u32..24,
            m in 0u32..60,
            noise in "[a-z ]{0,12}",
        ) {
            let cell = format!("{} {:02}:{:02}", noise, h, m);
            let classification = classify_day(&cell, false, &policy());
            let is_match = matches!(
                classification,
                DayClassification::MissingPunch { .. }
            );
            prop_assert!(is_match);
        }

        /// An on-time morning punch paired with an on-time evening punch is
        /// always normal.
        #[test]
        fn prop_on_time_day_is_normal(
            morning_minute in 0u32..=33,
            evening_minute in 0u32..60,
        ) {
            let cell = format!("08:{:02} 18:{:02}", morning_minute, evening_minute);
            let classification = classify_day(&cell, false, &policy());
            let is_match = matches!(classification, DayClassification::Normal { .. });
            prop_assert!(is_match);
        }

        /// Rest days never produce a classification beyond the raw
        /// pass-through.
        #[test]
        fn prop_rest_day_never_classifies(
            h in 0u32..24,
            m in 0u32..60,
        ) {
            let cell = format!("{:02}:{:02} 18:10", h, m);
            let classification = classify_day(&cell, true, &policy());
            let is_match = matches!(
                classification,
                DayClassification::RestDayRaw { .. }
            );
            prop_assert!(is_match);
        }
    }
}
