//! Run and job state as reported by the CI provider.

use std::fmt;

/// Lifecycle state of a workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunStatus {
    Queued,
    InProgress,
    Completed,
    /// Any state outside the documented set (e.g. `waiting`). Non-terminal.
    Other(String),
}

impl RunStatus {
    pub fn parse(value: &str) -> Self {
        match value {
            "queued" => RunStatus::Queued,
            "in_progress" => RunStatus::InProgress,
            "completed" => RunStatus::Completed,
            other => RunStatus::Other(other.to_string()),
        }
    }

    /// A run is terminal only once the provider reports `completed`.
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Queued => write!(f, "queued"),
            RunStatus::InProgress => write!(f, "in_progress"),
            RunStatus::Completed => write!(f, "completed"),
            RunStatus::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Terminal outcome classification of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunConclusion {
    Success,
    Failure,
    Cancelled,
    Skipped,
    Neutral,
    Other(String),
}

impl RunConclusion {
    pub fn parse(value: &str) -> Self {
        match value {
            "success" => RunConclusion::Success,
            "failure" => RunConclusion::Failure,
            "cancelled" => RunConclusion::Cancelled,
            "skipped" => RunConclusion::Skipped,
            "neutral" => RunConclusion::Neutral,
            other => RunConclusion::Other(other.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RunConclusion::Success)
    }

    /// Failure and cancellation both count as failed for log collection.
    pub fn is_failed(&self) -> bool {
        matches!(self, RunConclusion::Failure | RunConclusion::Cancelled)
    }
}

impl fmt::Display for RunConclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunConclusion::Success => write!(f, "success"),
            RunConclusion::Failure => write!(f, "failure"),
            RunConclusion::Cancelled => write!(f, "cancelled"),
            RunConclusion::Skipped => write!(f, "skipped"),
            RunConclusion::Neutral => write!(f, "neutral"),
            RunConclusion::Other(value) => write!(f, "{value}"),
        }
    }
}

/// Point-in-time view of one run. Never persisted; re-fetched on every poll.
///
/// The conclusion is present iff the status is `completed`. Metadata fields
/// are advisory and may be absent when the provider query degrades.
#[derive(Debug, Clone)]
pub struct RunSnapshot {
    pub id: u64,
    pub status: RunStatus,
    pub conclusion: Option<RunConclusion>,
    pub url: Option<String>,
    pub workflow_name: Option<String>,
    pub head_branch: Option<String>,
    pub event: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

impl RunSnapshot {
    pub fn is_success(&self) -> bool {
        self.conclusion.as_ref().is_some_and(RunConclusion::is_success)
    }
}

/// One job within a run.
#[derive(Debug, Clone)]
pub struct JobRecord {
    /// Provider-assigned id; absent for jobs the listing has not registered.
    pub id: Option<u64>,
    pub name: String,
    pub status: RunStatus,
    pub conclusion: Option<RunConclusion>,
}

impl JobRecord {
    /// Jobs concluded as failure or cancelled get their logs collected.
    pub fn is_failed(&self) -> bool {
        self.conclusion.as_ref().is_some_and(RunConclusion::is_failed)
    }

    pub fn id_label(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => "unknown".to_string(),
        }
    }
}

/// Run snapshot plus its job breakdown, as used by log collection.
#[derive(Debug, Clone)]
pub struct RunDetails {
    pub snapshot: RunSnapshot,
    pub jobs: Vec<JobRecord>,
}
