//! Results crossing the public trigger/monitor boundary.
//!
//! Run-level failure is data, not an error: a failed precondition, a lost
//! run id, and a red CI run all come back as ordinary values carrying an
//! exit code and a message.

use std::path::PathBuf;

/// Result of one trigger attempt.
#[derive(Debug, Clone)]
pub struct TriggerOutcome {
    pub success: bool,
    pub run_id: Option<u64>,
    pub message: String,
}

impl TriggerOutcome {
    /// A run was started and its id resolved and persisted.
    pub fn triggered(run_id: u64) -> Self {
        Self {
            success: true,
            run_id: Some(run_id),
            message: format!("Workflow triggered. Run id: {run_id}"),
        }
    }

    /// The attempt did not yield a usable run id. The message states which
    /// stage failed: precondition, dispatch, or id resolution.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { success: false, run_id: None, message: message.into() }
    }
}

/// Result of monitoring a run to completion.
#[derive(Debug, Clone)]
pub struct MonitorOutcome {
    pub success: bool,
    pub exit_code: i32,
    /// Failure report written by log collection, when one exists.
    pub report: Option<PathBuf>,
}

impl MonitorOutcome {
    pub fn succeeded() -> Self {
        Self { success: true, exit_code: 0, report: None }
    }

    pub fn failed(report: Option<PathBuf>) -> Self {
        Self { success: false, exit_code: 1, report }
    }
}
