//! Run status poller: observe a run until it reaches a terminal state.

use std::thread;
use std::time::Duration;

use chrono::{SecondsFormat, Utc};

use crate::app::commands::collect;
use crate::app::console::Console;
use crate::app::context::AppContext;
use crate::domain::{CancelToken, MonitorOutcome, RunSnapshot, RunStatus};
use crate::ports::{Git, GitHub};

/// Options for monitoring a run.
#[derive(Debug, Clone)]
pub struct MonitorOptions {
    /// Delay between status polls.
    pub poll_interval: Duration,
    /// Caller-supplied stop signal, observed once per tick.
    pub cancel: CancelToken,
}

/// Execute the monitor command.
///
/// The loop tolerates any number of transient fetch failures and
/// non-terminal observations; it returns only on a `completed` snapshot or
/// cancellation. There is no overall timeout; bounding wall-clock time is
/// the caller's job, via the token.
pub fn execute<G: GitHub, V: Git>(
    ctx: &AppContext<G, V>,
    run_id: Option<u64>,
    options: &MonitorOptions,
) -> MonitorOutcome {
    let console = ctx.console();

    if ctx.github().check_installed().is_err() {
        console.error("GitHub CLI (gh) not found. Install it from https://cli.github.com/");
        return MonitorOutcome::failed(None);
    }
    if ctx.github().check_authenticated().is_err() {
        console.error("GitHub CLI is not authenticated. Run: gh auth login");
        return MonitorOutcome::failed(None);
    }

    let run_id = match run_id {
        Some(id) => id,
        None => match ctx.run_pointer().load() {
            Ok(id) => id,
            Err(err) => {
                console.error(&err.to_string());
                return MonitorOutcome::failed(None);
            }
        },
    };

    console.info(&format!(
        "Watching run {run_id} (polling every {}s)...",
        options.poll_interval.as_secs()
    ));

    let mut iteration: u64 = 0;
    let mut header_shown = false;

    loop {
        if options.cancel.is_cancelled() {
            console.warning(&format!("Monitoring of run {run_id} cancelled"));
            return MonitorOutcome::failed(None);
        }
        iteration += 1;
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        match ctx.github().run_snapshot(run_id) {
            Err(_) => {
                // Transient tool or network hiccup; keep polling.
                console.info(&format!("[{timestamp}] [{iteration}] Status unavailable, retrying..."));
            }
            Ok(snapshot) => {
                if !header_shown {
                    header_shown = true;
                    print_header(console, &snapshot);
                }
                match &snapshot.status {
                    RunStatus::Queued => {
                        console.info(&format!("[{timestamp}] [{iteration}] Status: queued..."));
                    }
                    RunStatus::InProgress => {
                        console
                            .info(&format!("[{timestamp}] [{iteration}] Status: in progress..."));
                    }
                    RunStatus::Other(status) => {
                        console.info(&format!("[{timestamp}] [{iteration}] Status: {status}"));
                    }
                    RunStatus::Completed => {
                        return finish(ctx, run_id, &snapshot, &timestamp, iteration);
                    }
                }
            }
        }

        thread::sleep(options.poll_interval);
    }
}

fn print_header(console: &Console, snapshot: &RunSnapshot) {
    console.info(&format!("Workflow: {}", label(&snapshot.workflow_name)));
    console.info(&format!("Branch: {}", label(&snapshot.head_branch)));
    console.info(&format!("Event: {}", label(&snapshot.event)));
    if let Some(url) = &snapshot.url {
        console.info(&format!("URL: {url}"));
    }
}

fn finish<G: GitHub, V: Git>(
    ctx: &AppContext<G, V>,
    run_id: u64,
    snapshot: &RunSnapshot,
    timestamp: &str,
    iteration: u64,
) -> MonitorOutcome {
    let console = ctx.console();

    if snapshot.is_success() {
        console.info(&format!("[{timestamp}] [{iteration}] Status: completed - success"));
        banner(console, "Workflow run succeeded", false);
        return MonitorOutcome::succeeded();
    }

    let conclusion = match &snapshot.conclusion {
        Some(conclusion) => conclusion.to_string(),
        None => "unknown".to_string(),
    };
    console.error(&format!("[{timestamp}] [{iteration}] Status: completed - {conclusion}"));
    banner(console, "Workflow run failed", true);

    let report = collect::execute(ctx, run_id);
    match &report {
        Some(path) => console.info(&format!("Failure report saved to {}", path.display())),
        None => console.warning("No failure report could be collected"),
    }
    MonitorOutcome::failed(report)
}

fn banner(console: &Console, message: &str, failed: bool) {
    let rule = "=".repeat(42);
    if failed {
        console.error(&rule);
        console.error(&format!("  {message}"));
        console.error(&rule);
    } else {
        console.info(&rule);
        console.info(&format!("  {message}"));
        console.info(&rule);
    }
}

fn label(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("Unknown")
}
