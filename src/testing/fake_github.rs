use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::domain::{AppError, RunDetails, RunSnapshot};
use crate::ports::GitHub;

fn scripted_error() -> AppError {
    AppError::ExternalTool { tool: "gh".into(), details: "scripted failure".into() }
}

/// Scripted GitHub port double for unit tests.
pub(crate) struct FakeGitHub {
    pub installed: Mutex<bool>,
    pub authenticated: Mutex<bool>,
    pub repo: Mutex<Option<String>>,
    pub dispatch_error: Mutex<Option<String>>,
    pub dispatched: Mutex<Vec<(String, String, Vec<(String, String)>)>>,
    /// Scripted `latest_run_id` responses; an exhausted queue yields `None`.
    pub run_ids: Mutex<VecDeque<Option<u64>>>,
    pub run_id_calls: Mutex<u32>,
    /// Scripted snapshots; `Err(())` simulates a transient fetch failure.
    pub snapshots: Mutex<VecDeque<Result<RunSnapshot, ()>>>,
    pub snapshot_calls: Mutex<u32>,
    /// `None` simulates a detail fetch failure.
    pub details: Mutex<Option<RunDetails>>,
    /// Job-scoped logs by job id; a missing id simulates a failed call.
    pub job_logs: Mutex<HashMap<u64, String>>,
    pub failed_log: Mutex<Option<String>>,
    pub full_log: Mutex<Option<String>>,
    /// Order of log-retrieval calls, e.g. `job:7`, `failed`, `full`.
    pub log_calls: Mutex<Vec<String>>,
}

impl FakeGitHub {
    pub fn new() -> Self {
        Self {
            installed: Mutex::new(true),
            authenticated: Mutex::new(true),
            repo: Mutex::new(Some("owner/repo".to_string())),
            dispatch_error: Mutex::new(None),
            dispatched: Mutex::new(Vec::new()),
            run_ids: Mutex::new(VecDeque::new()),
            run_id_calls: Mutex::new(0),
            snapshots: Mutex::new(VecDeque::new()),
            snapshot_calls: Mutex::new(0),
            details: Mutex::new(None),
            job_logs: Mutex::new(HashMap::new()),
            failed_log: Mutex::new(None),
            full_log: Mutex::new(None),
            log_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn queue_run_id(&self, run_id: Option<u64>) {
        self.run_ids.lock().unwrap().push_back(run_id);
    }

    pub fn queue_snapshot(&self, snapshot: RunSnapshot) {
        self.snapshots.lock().unwrap().push_back(Ok(snapshot));
    }

    pub fn queue_snapshot_error(&self) {
        self.snapshots.lock().unwrap().push_back(Err(()));
    }
}

impl GitHub for FakeGitHub {
    fn check_installed(&self) -> Result<(), AppError> {
        if *self.installed.lock().unwrap() { Ok(()) } else { Err(scripted_error()) }
    }

    fn check_authenticated(&self) -> Result<(), AppError> {
        if *self.authenticated.lock().unwrap() { Ok(()) } else { Err(scripted_error()) }
    }

    fn repo_slug(&self) -> Result<String, AppError> {
        self.repo.lock().unwrap().clone().ok_or_else(scripted_error)
    }

    fn dispatch_workflow(
        &self,
        workflow: &str,
        ref_name: &str,
        inputs: &[(String, String)],
    ) -> Result<(), AppError> {
        if let Some(details) = self.dispatch_error.lock().unwrap().clone() {
            return Err(AppError::ExternalTool { tool: "gh".into(), details });
        }
        self.dispatched.lock().unwrap().push((
            workflow.to_string(),
            ref_name.to_string(),
            inputs.to_vec(),
        ));
        Ok(())
    }

    fn latest_run_id(&self, _workflow: &str) -> Result<Option<u64>, AppError> {
        *self.run_id_calls.lock().unwrap() += 1;
        Ok(self.run_ids.lock().unwrap().pop_front().flatten())
    }

    fn run_snapshot(&self, _run_id: u64) -> Result<RunSnapshot, AppError> {
        *self.snapshot_calls.lock().unwrap() += 1;
        match self.snapshots.lock().unwrap().pop_front() {
            Some(Ok(snapshot)) => Ok(snapshot),
            Some(Err(())) => Err(scripted_error()),
            None => panic!("snapshot queue exhausted"),
        }
    }

    fn run_details(&self, _run_id: u64) -> Result<RunDetails, AppError> {
        self.details.lock().unwrap().clone().ok_or_else(scripted_error)
    }

    fn job_log(&self, _run_id: u64, job_id: u64) -> Result<String, AppError> {
        self.log_calls.lock().unwrap().push(format!("job:{job_id}"));
        self.job_logs.lock().unwrap().get(&job_id).cloned().ok_or_else(scripted_error)
    }

    fn failed_step_log(&self, _run_id: u64) -> Result<String, AppError> {
        self.log_calls.lock().unwrap().push("failed".to_string());
        self.failed_log.lock().unwrap().clone().ok_or_else(scripted_error)
    }

    fn full_log(&self, _run_id: u64) -> Result<String, AppError> {
        self.log_calls.lock().unwrap().push("full".to_string());
        self.full_log.lock().unwrap().clone().ok_or_else(scripted_error)
    }
}
