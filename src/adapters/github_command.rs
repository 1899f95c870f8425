use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use serde::Deserialize;

use crate::domain::{AppError, JobRecord, RunConclusion, RunDetails, RunSnapshot, RunStatus};
use crate::ports::GitHub;

/// Fields requested from `gh run view` for status polling.
const RUN_FIELDS: &str =
    "status,conclusion,url,workflowName,headBranch,event,createdAt,updatedAt,databaseId";

/// Fields requested from `gh run view` for log collection.
const DETAIL_FIELDS: &str = "jobs,status,conclusion,workflowName,headBranch,event,url";

/// Deadlines for log downloads. Log retrieval can hang on large or
/// half-written runs; a stuck subprocess must not block collection of the
/// remaining jobs.
const JOB_LOG_DEADLINE: Duration = Duration::from_secs(60);
const FULL_LOG_DEADLINE: Duration = Duration::from_secs(120);

const DEADLINE_POLL: Duration = Duration::from_millis(100);

/// `gh`-backed implementation of the GitHub port.
#[derive(Debug, Clone, Default)]
pub struct GitHubCommandAdapter;

impl GitHubCommandAdapter {
    pub fn new() -> Self {
        Self
    }

    fn run_gh(&self, args: &[&str]) -> Result<String, AppError> {
        let output = Command::new("gh").args(args).output().map_err(|e| {
            AppError::ExternalTool {
                tool: "gh".into(),
                details: format!("failed to execute gh CLI: {e}"),
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ExternalTool {
                tool: "gh".into(),
                details: format!(
                    "gh {} failed: {}",
                    args.join(" "),
                    stderr.trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    /// Like `run_gh`, but kills the subprocess once `deadline` elapses.
    fn run_gh_with_deadline(&self, args: &[&str], deadline: Duration) -> Result<String, AppError> {
        let mut child = Command::new("gh")
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| AppError::ExternalTool {
                tool: "gh".into(),
                details: format!("failed to execute gh CLI: {e}"),
            })?;

        // Drain the pipes on separate threads so a chatty child cannot fill
        // the pipe buffer and stall before the deadline check sees it exit.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = wait_with_deadline(&mut child, args, deadline)?;
        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr);
            return Err(AppError::ExternalTool {
                tool: "gh".into(),
                details: format!("gh {} failed: {}", args.join(" "), stderr.trim()),
            });
        }

        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }
}

fn drain<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        if let Some(mut source) = source {
            let _ = source.read_to_end(&mut buffer);
        }
        buffer
    })
}

fn wait_with_deadline(
    child: &mut Child,
    args: &[&str],
    deadline: Duration,
) -> Result<std::process::ExitStatus, AppError> {
    let deadline_at = Instant::now() + deadline;
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if Instant::now() >= deadline_at {
            let _ = child.kill();
            let _ = child.wait();
            return Err(AppError::CommandTimeout {
                command: format!("gh {}", args.join(" ")),
                seconds: deadline.as_secs(),
            });
        }
        thread::sleep(DEADLINE_POLL);
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunViewPayload {
    #[serde(default)]
    database_id: Option<u64>,
    status: String,
    #[serde(default)]
    conclusion: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    workflow_name: Option<String>,
    #[serde(default)]
    head_branch: Option<String>,
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    created_at: Option<String>,
    #[serde(default)]
    updated_at: Option<String>,
    #[serde(default)]
    jobs: Vec<JobPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JobPayload {
    #[serde(default)]
    database_id: Option<u64>,
    name: String,
    status: String,
    #[serde(default)]
    conclusion: Option<String>,
}

/// `gh` emits `"conclusion": ""` on runs that have not completed.
fn parse_conclusion(raw: Option<String>) -> Option<RunConclusion> {
    raw.as_deref().filter(|value| !value.is_empty()).map(RunConclusion::parse)
}

fn parse_run_payload(raw: &str, what: &str) -> Result<RunViewPayload, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::ParseError { what: what.into(), details: e.to_string() })
}

fn snapshot_from(payload: &RunViewPayload, run_id: u64) -> RunSnapshot {
    RunSnapshot {
        id: payload.database_id.unwrap_or(run_id),
        status: RunStatus::parse(&payload.status),
        conclusion: parse_conclusion(payload.conclusion.clone()),
        url: payload.url.clone(),
        workflow_name: payload.workflow_name.clone(),
        head_branch: payload.head_branch.clone(),
        event: payload.event.clone(),
        created_at: payload.created_at.clone(),
        updated_at: payload.updated_at.clone(),
    }
}

impl GitHub for GitHubCommandAdapter {
    fn check_installed(&self) -> Result<(), AppError> {
        self.run_gh(&["--version"]).map(|_| ())
    }

    fn check_authenticated(&self) -> Result<(), AppError> {
        self.run_gh(&["auth", "status"]).map(|_| ())
    }

    fn repo_slug(&self) -> Result<String, AppError> {
        let raw = self.run_gh(&["repo", "view", "--json", "nameWithOwner"])?;
        let json: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::ParseError { what: "repository JSON".into(), details: e.to_string() }
        })?;
        json["nameWithOwner"]
            .as_str()
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::ParseError {
                what: "repository JSON".into(),
                details: "missing nameWithOwner".into(),
            })
    }

    fn dispatch_workflow(
        &self,
        workflow: &str,
        ref_name: &str,
        inputs: &[(String, String)],
    ) -> Result<(), AppError> {
        let mut cmd = Command::new("gh");
        cmd.args(["workflow", "run", workflow, "--ref", ref_name]);
        for (key, value) in inputs {
            cmd.arg("-f").arg(format!("{key}={value}"));
        }

        let output = cmd.output().map_err(|e| AppError::ExternalTool {
            tool: "gh".into(),
            details: format!("failed to execute gh CLI: {e}"),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::ExternalTool {
                tool: "gh".into(),
                details: format!("failed to dispatch workflow: {}", stderr.trim()),
            });
        }

        Ok(())
    }

    fn latest_run_id(&self, workflow: &str) -> Result<Option<u64>, AppError> {
        let raw = self.run_gh(&[
            "run", "list", "--workflow", workflow, "--limit", "1", "--json", "databaseId",
        ])?;
        let json: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            AppError::ParseError { what: "run list JSON".into(), details: e.to_string() }
        })?;
        Ok(json.get(0).and_then(|entry| entry["databaseId"].as_u64()))
    }

    fn run_snapshot(&self, run_id: u64) -> Result<RunSnapshot, AppError> {
        let raw = self.run_gh(&["run", "view", &run_id.to_string(), "--json", RUN_FIELDS])?;
        let payload = parse_run_payload(&raw, "run status JSON")?;
        Ok(snapshot_from(&payload, run_id))
    }

    fn run_details(&self, run_id: u64) -> Result<RunDetails, AppError> {
        let raw = self.run_gh(&["run", "view", &run_id.to_string(), "--json", DETAIL_FIELDS])?;
        let payload = parse_run_payload(&raw, "run detail JSON")?;

        let jobs = payload
            .jobs
            .iter()
            .map(|job| JobRecord {
                id: job.database_id,
                name: job.name.clone(),
                status: RunStatus::parse(&job.status),
                conclusion: parse_conclusion(job.conclusion.clone()),
            })
            .collect();

        Ok(RunDetails { snapshot: snapshot_from(&payload, run_id), jobs })
    }

    fn job_log(&self, run_id: u64, job_id: u64) -> Result<String, AppError> {
        self.run_gh_with_deadline(
            &["run", "view", &run_id.to_string(), "--log", "--job", &job_id.to_string()],
            JOB_LOG_DEADLINE,
        )
    }

    fn failed_step_log(&self, run_id: u64) -> Result<String, AppError> {
        self.run_gh_with_deadline(
            &["run", "view", &run_id.to_string(), "--log-failed"],
            JOB_LOG_DEADLINE,
        )
    }

    fn full_log(&self, run_id: u64) -> Result<String, AppError> {
        self.run_gh_with_deadline(
            &["run", "view", &run_id.to_string(), "--log"],
            FULL_LOG_DEADLINE,
        )
    }
}
