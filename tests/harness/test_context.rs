//! Shared testing harness for `wfm` integration tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::fake_gh::{DEFAULT_DETAIL_JSON, DEFAULT_RUN_JSON, FakeGh};

/// Testing harness providing an isolated project with a fake `gh` on PATH.
pub(crate) struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
    fake_gh: FakeGh,
}

impl TestContext {
    /// Create a new isolated environment with a git repository on `main`
    /// and a dispatchable workflow file.
    pub(crate) fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        // Explicitly set the initial branch to avoid default configuration
        // dependency.
        let output = std::process::Command::new("git")
            .args(["init", "--initial-branch=main"])
            .current_dir(&work_dir)
            .output()
            .expect("Failed to git init");
        assert!(
            output.status.success(),
            "git init failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        let workflow = work_dir.join(".github/workflows/deploy.yml");
        fs::create_dir_all(workflow.parent().unwrap()).expect("Failed to create workflows dir");
        fs::write(&workflow, "name: Deploy\non: workflow_dispatch\n")
            .expect("Failed to write workflow file");

        Self { root, work_dir, fake_gh: FakeGh::new() }
    }

    /// Path to the project directory used for CLI invocations.
    pub(crate) fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Everything the fake `gh` has been invoked with, one line per call.
    pub(crate) fn gh_log(&self) -> String {
        self.fake_gh.get_log()
    }

    /// Path of the run-pointer file inside the project.
    pub(crate) fn run_pointer_path(&self) -> PathBuf {
        self.work_dir.join(".github/.github_run_id.txt")
    }

    /// Seed the run pointer, as a previous `trigger` invocation would.
    pub(crate) fn write_run_pointer(&self, run_id: u64) {
        fs::write(self.run_pointer_path(), run_id.to_string())
            .expect("Failed to write run pointer");
    }

    /// Expected failure-report path for a run id.
    pub(crate) fn report_path(&self, run_id: u64) -> PathBuf {
        self.work_dir.join(format!(".github/workflow_logs/workflow_{run_id}_error.log"))
    }

    /// Build a command for invoking the compiled `wfm` binary.
    ///
    /// Delays are zeroed and the fake `gh` scenario defaults to a green
    /// run; individual tests override the `FAKE_GH_*` variables.
    pub(crate) fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("wfm").expect("Failed to locate wfm binary");
        let path = format!(
            "{}:{}",
            self.fake_gh.bin_dir.display(),
            std::env::var("PATH").unwrap_or_default()
        );
        cmd.current_dir(&self.work_dir)
            .env("PATH", path)
            .env("WFM_TRIGGER_DELAY", "0")
            .env("WFM_RESOLVE_DELAY", "0")
            .env("WFM_POLL_INTERVAL", "0")
            .env_remove("GITHUB_ACTIONS")
            .env("FAKE_GH_RUN_JSON", DEFAULT_RUN_JSON)
            .env("FAKE_GH_DETAIL_JSON", DEFAULT_DETAIL_JSON);
        cmd
    }
}
