//! Lifecycle orchestrator: trigger then monitor, one run attempt per call.

use std::time::Duration;

use crate::app::commands::{monitor, trigger};
use crate::app::console::Console;
use crate::app::context::AppContext;
use crate::domain::{CancelToken, MonitorOutcome};
use crate::ports::{Git, GitHub};

/// Options for the combined trigger + monitor command.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Git ref to run on; defaults to the current branch.
    pub ref_name: Option<String>,
    /// Workflow inputs passed through to the dispatch call.
    pub inputs: Vec<(String, String)>,
    /// Override for the configured poll interval.
    pub poll_interval: Option<Duration>,
    /// Caller-supplied stop signal for the monitoring stage.
    pub cancel: CancelToken,
}

/// Execute the run command. A failed trigger returns immediately; there is
/// no re-trigger within one call.
pub fn execute<G: GitHub, V: Git>(
    ctx: &AppContext<G, V>,
    workflow_file: &str,
    options: RunOptions,
) -> MonitorOutcome {
    let console = ctx.console();

    step_banner(console, "Step 1: Trigger workflow");
    let trigger_options =
        trigger::TriggerOptions { ref_name: options.ref_name, inputs: options.inputs };
    let triggered = trigger::execute(ctx, workflow_file, &trigger_options);
    if !triggered.success {
        console.error(&triggered.message);
        return MonitorOutcome::failed(None);
    }
    console.info(&triggered.message);
    console.info("");

    step_banner(console, "Step 2: Monitor workflow");
    let monitor_options = monitor::MonitorOptions {
        poll_interval: options.poll_interval.unwrap_or(ctx.config().poll_interval),
        cancel: options.cancel,
    };
    monitor::execute(ctx, triggered.run_id, &monitor_options)
}

fn step_banner(console: &Console, title: &str) {
    let rule = "=".repeat(42);
    console.info(&rule);
    console.info(&format!("  {title}"));
    console.info(&rule);
    console.info("");
}
