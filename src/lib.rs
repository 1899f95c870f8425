//! wfm: trigger, monitor, and debug GitHub Actions workflow runs.
//!
//! Drives a workflow run end-to-end from outside CI: dispatch through the
//! `gh` CLI, poll the run to completion, and reconstruct a failure report
//! from job logs when it goes red.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;


use std::path::{Path, PathBuf};

use adapters::git_command::GitCommandAdapter;
use adapters::github_command::GitHubCommandAdapter;
use app::AppContext;
use app::commands::{analyze, collect, monitor, run as run_command, trigger};
use app::config::ManagerConfig;

pub use app::commands::monitor::MonitorOptions;
pub use app::commands::run::RunOptions;
pub use app::commands::trigger::TriggerOptions;
pub use domain::{AppError, CancelToken, LogAnalysis, MonitorOutcome, TriggerOutcome};

fn context(
    project_root: PathBuf,
) -> Result<AppContext<GitHubCommandAdapter, GitCommandAdapter>, AppError> {
    let config = ManagerConfig::from_env(project_root.clone())?;
    Ok(AppContext::new(GitHubCommandAdapter::new(), GitCommandAdapter::new(project_root), config))
}

/// Trigger a workflow and resolve the new run id.
///
/// Run-level failure comes back inside the outcome; `Err` is reserved for
/// configuration problems.
pub fn trigger_workflow(
    project_root: PathBuf,
    workflow_file: &str,
    options: TriggerOptions,
) -> Result<TriggerOutcome, AppError> {
    let ctx = context(project_root)?;
    Ok(trigger::execute(&ctx, workflow_file, &options))
}

/// Watch a run until it completes; collects logs when it fails.
///
/// With no `run_id`, the last triggered run is read from the pointer file.
pub fn monitor_run(
    project_root: PathBuf,
    run_id: Option<u64>,
    options: MonitorOptions,
) -> Result<MonitorOutcome, AppError> {
    let ctx = context(project_root)?;
    Ok(monitor::execute(&ctx, run_id, &options))
}

/// Collect the failure report for a completed run.
///
/// Best-effort: returns the report path, or `None` when nothing could be
/// collected.
pub fn collect_logs(project_root: PathBuf, run_id: u64) -> Result<Option<PathBuf>, AppError> {
    let ctx = context(project_root)?;
    Ok(collect::execute(&ctx, run_id))
}

/// Trigger a workflow and watch it to completion.
pub fn run_workflow(
    project_root: PathBuf,
    workflow_file: &str,
    options: RunOptions,
) -> Result<MonitorOutcome, AppError> {
    let ctx = context(project_root)?;
    Ok(run_command::execute(&ctx, workflow_file, options))
}

/// Analyze a collected failure report file.
pub fn analyze_log(log_file: &Path) -> Result<LogAnalysis, AppError> {
    analyze::execute(log_file)
}
