//! Failure log collector: turn a failed run into a diagnostic artifact.

use std::fs;
use std::path::PathBuf;

use chrono::Utc;

use crate::app::context::AppContext;
use crate::domain::{FailureReport, JobRecord, RunDetails};
use crate::ports::{Git, GitHub};

/// Ordered log-retrieval fallbacks.
///
/// The provider's log granularity varies with run and job state (jobs
/// cancelled mid-stream may expose no per-job log), so each failed job
/// walks this list until one source yields text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogStrategy {
    /// Job-scoped log by job id.
    JobLog(u64),
    /// Run-scoped log restricted to failed steps.
    FailedSteps,
    /// The complete run log.
    FullRun,
}

impl LogStrategy {
    /// Section label for text that did not come from the job-scoped source.
    fn label(&self) -> Option<&'static str> {
        match self {
            LogStrategy::JobLog(_) => None,
            LogStrategy::FailedSteps => Some("Failed-step log"),
            LogStrategy::FullRun => Some("Full run log"),
        }
    }

    /// Fetch through this source; errors and blank output both yield `None`.
    fn fetch(&self, github: &impl GitHub, run_id: u64) -> Option<String> {
        let text = match self {
            LogStrategy::JobLog(job_id) => github.job_log(run_id, *job_id),
            LogStrategy::FailedSteps => github.failed_step_log(run_id),
            LogStrategy::FullRun => github.full_log(run_id),
        }
        .ok()?;
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Apply strategies in order, stopping at the first that yields text.
pub fn first_non_empty(
    github: &impl GitHub,
    run_id: u64,
    strategies: &[LogStrategy],
) -> Option<(LogStrategy, String)> {
    strategies.iter().find_map(|strategy| {
        strategy.fetch(github, run_id).map(|text| (*strategy, text))
    })
}

fn strategies_for(job: &JobRecord) -> Vec<LogStrategy> {
    let mut strategies = Vec::with_capacity(3);
    if let Some(job_id) = job.id {
        strategies.push(LogStrategy::JobLog(job_id));
    }
    strategies.push(LogStrategy::FailedSteps);
    strategies.push(LogStrategy::FullRun);
    strategies
}

/// Execute the collect command.
///
/// Strictly best-effort: any unrecoverable failure yields `None` rather
/// than an error, since diagnostics never gate the monitor result.
pub fn execute<G: GitHub, V: Git>(ctx: &AppContext<G, V>, run_id: u64) -> Option<PathBuf> {
    let console = ctx.console();
    console.info("Collecting workflow logs...");

    let details = match ctx.github().run_details(run_id) {
        Ok(details) => details,
        Err(err) => {
            console.error(&format!("Failed to collect logs: {err}"));
            return None;
        }
    };

    let report = assemble(ctx, run_id, &details);
    write_report(ctx, run_id, &report)
}

fn assemble<G: GitHub, V: Git>(
    ctx: &AppContext<G, V>,
    run_id: u64,
    details: &RunDetails,
) -> FailureReport {
    let mut report = FailureReport::new(run_id, details, Utc::now());
    let url = details.snapshot.url.as_deref();

    if details.jobs.is_empty() {
        report.note_no_jobs();
        return report;
    }

    report.job_summary(&details.jobs);

    let failed: Vec<&JobRecord> = details.jobs.iter().filter(|job| job.is_failed()).collect();
    if failed.is_empty() {
        // A run can conclude non-success with no job individually failed,
        // e.g. run-level cancellation.
        report.note_run_level_fallback();
        match first_non_empty(ctx.github(), run_id, &[LogStrategy::FullRun]) {
            Some((strategy, text)) => report.log_text(strategy.label(), &text),
            None => report.unavailable_notice("the run", url),
        }
        return report;
    }

    report.failed_job_list(&failed);
    for job in failed {
        ctx.console().info(&format!(
            "Fetching log for job '{}' (ID: {})...",
            job.name,
            job.id_label()
        ));
        report.begin_job_section(job);
        match first_non_empty(ctx.github(), run_id, &strategies_for(job)) {
            Some((strategy, text)) => report.log_text(strategy.label(), &text),
            None => report.unavailable_notice(&format!("job '{}'", job.name), url),
        }
    }
    report
}

fn write_report<G: GitHub, V: Git>(
    ctx: &AppContext<G, V>,
    run_id: u64,
    report: &FailureReport,
) -> Option<PathBuf> {
    let log_dir = ctx.config().log_dir();
    if let Err(err) = fs::create_dir_all(&log_dir) {
        ctx.console().error(&format!("Failed to create log directory: {err}"));
        return None;
    }

    let path = log_dir.join(FailureReport::file_name(run_id));
    match fs::write(&path, report.render()) {
        Ok(()) => Some(path),
        Err(err) => {
            ctx.console().error(&format!("Failed to write failure report: {err}"));
            None
        }
    }
}
