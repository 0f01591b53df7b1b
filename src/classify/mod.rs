//! Base classification logic.
//!
//! This module turns the raw punch cell of one employee-day into a
//! [`DayClassification`](crate::models::DayClassification): punch-token
//! extraction plus the single-day classification rules.

mod classifier;
mod punches;

pub use classifier::classify_day;
pub use punches::extract_punches;
