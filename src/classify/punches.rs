//! Punch-token extraction.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

static PUNCH_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}:\d{2}").expect("valid punch pattern"));

/// Extracts all `HH:MM` punch times from a raw cell.
///
/// The cell is free-form text that may hold zero or more clock punches
/// alongside arbitrary annotations. Tokens that match the pattern but are
/// not valid 24-hour times (e.g. `29:30`) are skipped.
///
/// # Example
///
/// ```
/// use attendance_engine::classify::extract_punches;
/// use chrono::NaiveTime;
///
/// let punches = extract_punches("08:20 18:10");
/// assert_eq!(
///     punches,
///     vec![
///         NaiveTime::from_hms_opt(8, 20, 0).unwrap(),
///         NaiveTime::from_hms_opt(18, 10, 0).unwrap(),
///     ]
/// );
/// ```
pub fn extract_punches(cell: &str) -> Vec<NaiveTime> {
    PUNCH_TOKEN
        .find_iter(cell)
        .filter_map(|token| NaiveTime::parse_from_str(token.as_str(), "%H:%M").ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_extracts_two_punches() {
        assert_eq!(extract_punches("08:20 18:10"), vec![time(8, 20), time(18, 10)]);
    }

    #[test]
    fn test_extracts_from_annotated_text() {
        assert_eq!(
            extract_punches("badge 09:10 (gate B), out 17:45"),
            vec![time(9, 10), time(17, 45)]
        );
    }

    #[test]
    fn test_empty_cell_yields_nothing() {
        assert!(extract_punches("").is_empty());
        assert!(extract_punches("   ").is_empty());
    }

    #[test]
    fn test_text_without_times_yields_nothing() {
        assert!(extract_punches("device offline").is_empty());
    }

    #[test]
    fn test_invalid_times_are_skipped() {
        assert_eq!(extract_punches("29:30 08:15"), vec![time(8, 15)]);
        assert!(extract_punches("12:73").is_empty());
    }

    #[test]
    fn test_more_than_two_punches_all_kept() {
        assert_eq!(
            extract_punches("08:20 12:01 13:02 18:10"),
            vec![time(8, 20), time(12, 1), time(13, 2), time(18, 10)]
        );
    }

    #[test]
    fn test_midnight_and_end_of_day() {
        assert_eq!(extract_punches("00:00 23:59"), vec![time(0, 0), time(23, 59)]);
    }
}
