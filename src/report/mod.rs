//! Read-only consumers of the final day statuses.
//!
//! The monthly aggregator and the display formatter both consume the same
//! structured category extraction, so the counters and the report icons can
//! never drift apart.

mod aggregate;
mod display;

pub use aggregate::{aggregate_month, aggregate_sheet};
pub use display::format_day_status;
