//! Failure report assembly.

use chrono::{DateTime, Utc};

use super::run::{JobRecord, RunDetails};

fn heavy_rule() -> String {
    "=".repeat(80)
}

fn light_rule() -> String {
    "-".repeat(80)
}

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}

/// Diagnostic artifact assembled for a failed run.
///
/// Append-only while under construction; rendered once and written as a
/// single UTF-8 blob named `workflow_<runId>_error.log`. Human-readable,
/// not structured for re-parsing.
#[derive(Debug)]
pub struct FailureReport {
    lines: Vec<String>,
}

impl FailureReport {
    /// Start a report with the fixed header block.
    pub fn new(run_id: u64, details: &RunDetails, collected_at: DateTime<Utc>) -> Self {
        let snapshot = &details.snapshot;
        let conclusion = match &snapshot.conclusion {
            Some(conclusion) => conclusion.to_string(),
            None => "Unknown".to_string(),
        };

        let mut report = Self { lines: Vec::new() };
        report.push(heavy_rule());
        report.push("GitHub Actions workflow failure report");
        report.push(heavy_rule());
        report.push("");
        report.push(format!("Run ID: {run_id}"));
        report.push(format!("Workflow: {}", field(&snapshot.workflow_name)));
        report.push(format!("Branch: {}", field(&snapshot.head_branch)));
        report.push(format!("Event: {}", field(&snapshot.event)));
        report.push(format!("Status: {}", snapshot.status));
        report.push(format!("Conclusion: {conclusion}"));
        report.push(format!("Collected at: {}", collected_at.to_rfc3339()));
        report.push("");
        report.push(heavy_rule());
        report.push("");
        report
    }

    /// File name the report is persisted under.
    pub fn file_name(run_id: u64) -> String {
        format!("workflow_{run_id}_error.log")
    }

    fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Note that the provider returned no job breakdown at all.
    pub fn note_no_jobs(&mut self) {
        self.push("No job information found");
        self.push("");
    }

    /// One summary line per job.
    pub fn job_summary(&mut self, jobs: &[JobRecord]) {
        self.push("Job summary:");
        self.push(light_rule());
        for job in jobs {
            let conclusion = match &job.conclusion {
                Some(conclusion) => conclusion.to_string(),
                None => "Unknown".to_string(),
            };
            self.push(format!(
                "  {}: {} / {} (ID: {})",
                job.name,
                job.status,
                conclusion,
                job.id_label()
            ));
        }
        self.push("");
        self.push(heavy_rule());
        self.push("");
    }

    /// List the jobs whose log sections follow.
    pub fn failed_job_list(&mut self, jobs: &[&JobRecord]) {
        self.push(format!("Failed jobs ({}):", jobs.len()));
        self.push(light_rule());
        for job in jobs {
            self.push(format!("  - {} (ID: {})", job.name, job.id_label()));
        }
        self.push("");
        self.push(heavy_rule());
        self.push("");
    }

    /// Open the log section for one failed job.
    pub fn begin_job_section(&mut self, job: &JobRecord) {
        self.push("");
        self.push(heavy_rule());
        self.push(format!("Job: {} (ID: {})", job.name, job.id_label()));
        self.push(heavy_rule());
        self.push("");
    }

    /// Note that no job was individually marked failed before falling back
    /// to the run-wide log.
    pub fn note_run_level_fallback(&mut self) {
        self.push("No individual job marked failed; falling back to the full run log");
        self.push(light_rule());
        self.push("");
    }

    /// Raw log text, labelled when it came from a run-wide fallback source.
    pub fn log_text(&mut self, label: Option<&str>, text: &str) {
        if let Some(label) = label {
            self.push(format!("{label}:"));
            self.push(light_rule());
        }
        self.push(text);
        self.push("");
    }

    /// Every retrieval source came back empty; point at the web UI.
    pub fn unavailable_notice(&mut self, what: &str, url: Option<&str>) {
        self.push(format!("Could not retrieve logs for {what}"));
        self.push("See the run page for details:");
        self.push(format!("  {}", url.unwrap_or("")));
        self.push("");
    }

    /// Render the report as a single text blob.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}
