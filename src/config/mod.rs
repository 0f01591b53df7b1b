//! Configuration for the attendance engine.
//!
//! This module contains the classifier policy and holiday calendar types
//! and the [`ConfigLoader`] that reads them from YAML files.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CalendarConfig, ClassifierPolicy, HolidayCalendar};
