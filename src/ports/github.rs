use crate::domain::{AppError, RunDetails, RunSnapshot};

/// Boundary to the GitHub CLI.
///
/// Every method maps to one `gh` invocation; implementations return the
/// parsed result, or an `AppError` for a non-zero exit, malformed output,
/// or a missed deadline.
pub trait GitHub {
    /// Check the CLI is installed (`gh --version`).
    fn check_installed(&self) -> Result<(), AppError>;

    /// Check the CLI reports an authenticated session (`gh auth status`).
    fn check_authenticated(&self) -> Result<(), AppError>;

    /// Resolve the `owner/repo` slug for the current repository.
    fn repo_slug(&self) -> Result<String, AppError>;

    /// Start a workflow run on `ref_name` with flattened key=value inputs.
    fn dispatch_workflow(
        &self,
        workflow: &str,
        ref_name: &str,
        inputs: &[(String, String)],
    ) -> Result<(), AppError>;

    /// Id of the most recent run for a workflow file, if the listing has
    /// caught up with the dispatch.
    fn latest_run_id(&self, workflow: &str) -> Result<Option<u64>, AppError>;

    /// Point-in-time status of one run.
    fn run_snapshot(&self, run_id: u64) -> Result<RunSnapshot, AppError>;

    /// Status plus per-job breakdown of one run.
    fn run_details(&self, run_id: u64) -> Result<RunDetails, AppError>;

    /// Log text scoped to a single job.
    fn job_log(&self, run_id: u64, job_id: u64) -> Result<String, AppError>;

    /// Log text restricted to failed steps.
    fn failed_step_log(&self, run_id: u64) -> Result<String, AppError>;

    /// The complete run log.
    fn full_log(&self, run_id: u64) -> Result<String, AppError>;
}
