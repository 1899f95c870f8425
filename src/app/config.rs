//! Typed process configuration.
//!
//! All recognized environment keys are parsed once at entry; the command
//! state machines receive plain values and never read the environment.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::domain::AppError;

pub const DEFAULT_BRANCH: &str = "main";

const DEFAULT_POLL_INTERVAL_SECS: u64 = 5;
const DEFAULT_RESOLVE_ATTEMPTS: u32 = 10;
const DEFAULT_RESOLVE_DELAY_SECS: u64 = 2;
const DEFAULT_TRIGGER_DELAY_SECS: u64 = 3;

/// Settings shared by trigger, monitoring, and collection.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Directory workflow files and state paths are resolved against.
    pub project_root: PathBuf,
    /// Ref used when the current branch cannot be resolved.
    pub default_branch: String,
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Maximum attempts for resolving a freshly dispatched run id.
    pub resolve_attempts: u32,
    /// Delay between id-resolution attempts.
    pub resolve_delay: Duration,
    /// Settle time between dispatching and the first id-resolution attempt.
    pub trigger_delay: Duration,
    /// Whether the process itself runs inside GitHub Actions.
    pub github_actions: bool,
}

impl ManagerConfig {
    /// Build the configuration from the process environment.
    pub fn from_env(project_root: PathBuf) -> Result<Self, AppError> {
        Self::from_lookup(project_root, |key| std::env::var(key).ok())
    }

    /// Build the configuration from an explicit key lookup.
    pub fn from_lookup(
        project_root: PathBuf,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        Ok(Self {
            project_root,
            default_branch: lookup("WFM_DEFAULT_BRANCH")
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            poll_interval: Duration::from_secs(parse_key(
                &lookup,
                "WFM_POLL_INTERVAL",
                DEFAULT_POLL_INTERVAL_SECS,
            )?),
            resolve_attempts: parse_key(&lookup, "WFM_RESOLVE_ATTEMPTS", DEFAULT_RESOLVE_ATTEMPTS)?,
            resolve_delay: Duration::from_secs(parse_key(
                &lookup,
                "WFM_RESOLVE_DELAY",
                DEFAULT_RESOLVE_DELAY_SECS,
            )?),
            trigger_delay: Duration::from_secs(parse_key(
                &lookup,
                "WFM_TRIGGER_DELAY",
                DEFAULT_TRIGGER_DELAY_SECS,
            )?),
            github_actions: lookup("GITHUB_ACTIONS").as_deref() == Some("true"),
        })
    }

    /// Pointer file holding the last triggered run id.
    pub fn run_pointer_path(&self) -> PathBuf {
        self.project_root.join(".github").join(".github_run_id.txt")
    }

    /// Directory collected failure reports are written to.
    pub fn log_dir(&self) -> PathBuf {
        self.project_root.join(".github").join("workflow_logs")
    }
}

fn parse_key<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, AppError> {
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::Configuration(format!("{key} must be a non-negative integer, got '{raw}'"))
        }),
        None => Ok(default),
    }
}
