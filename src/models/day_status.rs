//! Structured per-day attendance status.
//!
//! The legacy store kept one free-text field per day that served both as
//! human-readable display and as machine-parsed aggregation input. Here
//! the status is a tagged record: a base classification plus an ordered list
//! of overlay annotations. [`DayStatus::render`] produces the legacy wire
//! string (the persisted text-column format), and [`DayStatus::categories`] /
//! [`DayStatus::overtime_hours`] are the explicit extraction functions the
//! aggregator and display formatter both consume, so the two consumers can
//! never disagree on token spelling.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::event::SourceSystem;

/// The base classification derived from punches and the rest-day flag,
/// before any overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayClassification {
    /// Rest day with no punches. Renders to the empty string.
    Empty,
    /// Rest day with punches: the raw cell text is carried verbatim,
    /// with no classification applied.
    RestDayRaw {
        /// The raw punch cell text.
        raw: String,
    },
    /// Workday with fewer than two punches.
    MissingPunch {
        /// The raw cell text, when it was non-empty.
        raw: Option<String>,
    },
    /// Workday with a compliant first and last punch.
    Normal {
        /// Earliest punch of the day.
        first: NaiveTime,
        /// Latest punch of the day.
        last: NaiveTime,
    },
    /// Workday flagged late and/or early-leave. At least one flag is set.
    Flagged {
        /// Arrived after the morning limit.
        late: bool,
        /// Left at least the early-leave threshold before the evening limit.
        early_leave: bool,
        /// Earliest punch of the day.
        first: NaiveTime,
        /// Latest punch of the day.
        last: NaiveTime,
    },
    /// Lateness of at least the half-day threshold but under the full-day
    /// threshold: half a day of absence.
    AbsentHalf {
        /// Earliest punch of the day.
        first: NaiveTime,
        /// Latest punch of the day.
        last: NaiveTime,
    },
    /// Lateness of at least the full-day threshold: a full day of absence.
    AbsentFull {
        /// Earliest punch of the day.
        first: NaiveTime,
        /// Latest punch of the day.
        last: NaiveTime,
    },
}

/// A single overlay applied on top of the base classification.
///
/// Annotations are ordered: rendering folds them left to right, so a trip
/// override discards whatever preceded it while leave and overtime notes
/// attach to whatever is already present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayAnnotation {
    /// A business trip that replaces the day's status entirely.
    TripOverride {
        /// The trip reason.
        reason: String,
    },
    /// An appended leave note.
    LeaveNote {
        /// The upstream system the leave came from.
        source: SourceSystem,
        /// The leave duration text, e.g. "1 day".
        duration: String,
        /// The leave reason.
        reason: String,
    },
    /// An appended overtime note.
    OvertimeNote {
        /// The upstream system the overtime came from.
        source: SourceSystem,
        /// Overtime hours.
        hours: f64,
    },
}

/// Category flags extracted from a day's status.
///
/// A single day may set several flags at once (a late day can also hold a
/// leave note); the monthly counters are additive, not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCategories {
    /// Compliant first and last punch.
    pub normal: bool,
    /// Arrived after the morning limit.
    pub late: bool,
    /// Left early in the afternoon.
    pub early_leave: bool,
    /// Fewer than two punches on a workday.
    pub missing_punch: bool,
    /// Half or full day of absence.
    pub absent: bool,
    /// A business-trip override is present.
    pub business_trip: bool,
    /// At least one leave note is present.
    pub leave: bool,
}

/// The complete status of one employee-day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStatus {
    /// The base classification.
    pub classification: DayClassification,
    /// Overlay annotations in application order.
    #[serde(default)]
    pub overlays: Vec<OverlayAnnotation>,
}

fn fmt_times(first: NaiveTime, last: NaiveTime) -> String {
    format!("({}, {})", first.format("%H:%M"), last.format("%H:%M"))
}

impl DayClassification {
    /// Renders the base classification to its wire-format string.
    pub fn render(&self) -> String {
        match self {
            DayClassification::Empty => String::new(),
            DayClassification::RestDayRaw { raw } => raw.clone(),
            DayClassification::MissingPunch { raw } => match raw {
                Some(text) => format!("missing-punch(1 day) {}", text),
                None => "missing-punch(1 day)".to_string(),
            },
            DayClassification::Normal { first, last } => {
                format!("normal{}", fmt_times(*first, *last))
            }
            DayClassification::Flagged {
                late,
                early_leave,
                first,
                last,
            } => {
                let mut tags = Vec::new();
                if *late {
                    tags.push("late");
                }
                if *early_leave {
                    tags.push("early-leave");
                }
                format!("{}{}", tags.join("+"), fmt_times(*first, *last))
            }
            DayClassification::AbsentHalf { first, last } => {
                format!("absent-half(0.5 day){}", fmt_times(*first, *last))
            }
            DayClassification::AbsentFull { first, last } => {
                format!("absent-full(1 day){}", fmt_times(*first, *last))
            }
        }
    }
}

impl OverlayAnnotation {
    /// Renders the annotation's note text, without any joiner.
    pub fn render(&self) -> String {
        match self {
            OverlayAnnotation::TripOverride { reason } => {
                format!("business-trip({})", reason)
            }
            OverlayAnnotation::LeaveNote {
                source,
                duration,
                reason,
            } => format!("{}-leave({})({})", source, duration, reason),
            OverlayAnnotation::OvertimeNote { source, hours } => {
                format!("{}overtime({}h)", source, hours)
            }
        }
    }
}

impl DayStatus {
    /// Creates a status from a base classification with no overlays.
    pub fn base(classification: DayClassification) -> Self {
        Self {
            classification,
            overlays: Vec::new(),
        }
    }

    /// Creates an empty status (rest day without punches).
    pub fn empty() -> Self {
        Self::base(DayClassification::Empty)
    }

    /// Applies a business-trip override, discarding the base classification
    /// and every prior overlay. Applying the same trip twice leaves the
    /// status unchanged.
    pub fn apply_trip(&mut self, reason: impl Into<String>) {
        self.classification = DayClassification::Empty;
        self.overlays = vec![OverlayAnnotation::TripOverride {
            reason: reason.into(),
        }];
    }

    /// Appends a leave note. Strictly additive: a duplicate event appends
    /// a second identical note.
    pub fn push_leave(
        &mut self,
        source: SourceSystem,
        duration: impl Into<String>,
        reason: impl Into<String>,
    ) {
        self.overlays.push(OverlayAnnotation::LeaveNote {
            source,
            duration: duration.into(),
            reason: reason.into(),
        });
    }

    /// Appends an overtime note.
    pub fn push_overtime(&mut self, source: SourceSystem, hours: f64) {
        self.overlays
            .push(OverlayAnnotation::OvertimeNote { source, hours });
    }

    /// Renders the full status to the legacy wire-format string.
    ///
    /// Overlays fold in order: a trip override replaces the accumulated
    /// text with `business-trip(<reason>)`, a leave note appends
    /// `\n<source>-leave(<duration>)(<reason>)` (without the separator when
    /// the accumulated text is empty), and an overtime note appends
    /// `" + <source>overtime(<hours>h)"` under the same empty rule.
    ///
    /// # Example
    ///
    /// ```
    /// use attendance_engine::models::{DayClassification, DayStatus, SourceSystem};
    /// use chrono::NaiveTime;
    ///
    /// let mut status = DayStatus::base(DayClassification::AbsentHalf {
    ///     first: NaiveTime::from_hms_opt(9, 10, 0).unwrap(),
    ///     last: NaiveTime::from_hms_opt(17, 0, 0).unwrap(),
    /// });
    /// status.push_leave(SourceSystem::OriginA, "1 day", "sick");
    /// assert_eq!(
    ///     status.render(),
    ///     "absent-half(0.5 day)(09:10, 17:00)\norigin-A-leave(1 day)(sick)"
    /// );
    /// ```
    pub fn render(&self) -> String {
        let mut rendered = self.classification.render();
        for overlay in &self.overlays {
            match overlay {
                OverlayAnnotation::TripOverride { .. } => {
                    rendered = overlay.render();
                }
                OverlayAnnotation::LeaveNote { .. } => {
                    if rendered.is_empty() {
                        rendered = overlay.render();
                    } else {
                        rendered = format!("{}\n{}", rendered, overlay.render());
                    }
                }
                OverlayAnnotation::OvertimeNote { .. } => {
                    if rendered.is_empty() {
                        rendered = overlay.render();
                    } else {
                        rendered = format!("{} + {}", rendered, overlay.render());
                    }
                }
            }
        }
        rendered
    }

    /// Extracts the category flags for aggregation and display.
    pub fn categories(&self) -> DayCategories {
        let mut categories = DayCategories::default();

        match &self.classification {
            DayClassification::Empty | DayClassification::RestDayRaw { .. } => {}
            DayClassification::MissingPunch { .. } => categories.missing_punch = true,
            DayClassification::Normal { .. } => categories.normal = true,
            DayClassification::Flagged {
                late, early_leave, ..
            } => {
                categories.late = *late;
                categories.early_leave = *early_leave;
            }
            DayClassification::AbsentHalf { .. } | DayClassification::AbsentFull { .. } => {
                categories.absent = true;
            }
        }

        for overlay in &self.overlays {
            match overlay {
                OverlayAnnotation::TripOverride { .. } => categories.business_trip = true,
                OverlayAnnotation::LeaveNote { .. } => categories.leave = true,
                OverlayAnnotation::OvertimeNote { .. } => {}
            }
        }

        categories
    }

    /// Sums the overtime hours recorded against the given source.
    pub fn overtime_hours(&self, source: SourceSystem) -> f64 {
        self.overlays
            .iter()
            .filter_map(|overlay| match overlay {
                OverlayAnnotation::OvertimeNote { source: s, hours } if *s == source => {
                    Some(*hours)
                }
                _ => None,
            })
            .sum()
    }
}
