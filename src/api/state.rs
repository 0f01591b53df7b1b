//! Application state for the attendance engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::config::ClassifierPolicy;
use crate::pipeline::StageSummary;

/// The recorded outcome of a finished pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    /// Whether the run completed without a fatal error.
    pub success: bool,
    /// The fatal error message, when the run aborted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Per-stage record counts for a completed run.
    #[serde(default)]
    pub summaries: Vec<StageSummary>,
}

/// State of the most recent pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunState {
    /// Identifier of the most recent run, if any.
    pub run_id: Option<Uuid>,
    /// Whether a run is currently executing.
    pub is_running: bool,
    /// When the most recent run started.
    pub started_at: Option<DateTime<Utc>>,
    /// When the most recent run finished.
    pub finished_at: Option<DateTime<Utc>>,
    /// Outcome of the most recent finished run.
    pub outcome: Option<RunOutcome>,
}

/// Shared application state.
///
/// Contains the classifier policy loaded at startup and the shared
/// run-state record updated by the run endpoints.
#[derive(Clone)]
pub struct AppState {
    policy: Arc<ClassifierPolicy>,
    run_state: Arc<RwLock<RunState>>,
}

impl AppState {
    /// Creates a new application state with the given classifier policy.
    pub fn new(policy: ClassifierPolicy) -> Self {
        Self {
            policy: Arc::new(policy),
            run_state: Arc::new(RwLock::new(RunState::default())),
        }
    }

    /// Returns the classifier policy.
    pub fn policy(&self) -> &ClassifierPolicy {
        &self.policy
    }

    /// Returns the shared run-state record.
    pub fn run_state(&self) -> Arc<RwLock<RunState>> {
        Arc::clone(&self.run_state)
    }
}
