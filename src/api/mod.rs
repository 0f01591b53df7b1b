//! HTTP API module for the attendance engine.
//!
//! This module provides the trigger surface for running the pipeline:
//! a synchronous run endpoint, an asynchronous variant, and a run-status
//! endpoint.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::RunRequest;
pub use response::{ApiError, RunResponse};
pub use state::{AppState, RunOutcome, RunState};
