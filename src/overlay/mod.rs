//! Event overlay mergers.
//!
//! Three independent units that mutate day statuses for one employee from
//! an approved event: the trip overlay (full overwrite), the leave overlay
//! (append, prefix name match), and the overtime overlay (append, start day
//! only). Each function applies a single event; batch iteration, skip
//! accounting, and ordering live in the pipeline orchestrator.

mod leave;
mod overtime;
mod trip;

pub use leave::apply_leave_event;
pub use overtime::apply_overtime_event;
pub use trip::apply_trip_event;
