//! Attendance Classification & Merge Engine
//!
//! This crate derives per-employee, per-day attendance classifications for a
//! calendar month from raw time-clock punches, overlays approved business
//! trips, leave, and overtime onto the daily statuses, and aggregates the
//! results into monthly counters.

#![warn(missing_docs)]

pub mod api;
pub mod classify;
pub mod config;
pub mod error;
pub mod models;
pub mod overlay;
pub mod pipeline;
pub mod report;
