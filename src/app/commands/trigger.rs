//! Workflow trigger: start exactly one remote run and resolve its id.

use std::path::Path;
use std::thread;

use crate::app::context::AppContext;
use crate::domain::TriggerOutcome;
use crate::ports::{Git, GitHub};

/// Options for triggering a workflow.
#[derive(Debug, Clone, Default)]
pub struct TriggerOptions {
    /// Git ref to run on; defaults to the current branch.
    pub ref_name: Option<String>,
    /// Workflow inputs passed through to the dispatch call as `-f key=value`.
    pub inputs: Vec<(String, String)>,
}

/// Execute the trigger command.
///
/// Preconditions are checked in order and short-circuit: CLI installed,
/// authenticated, workflow file present, repository resolvable. None are
/// retried, and no dispatch call is made when any fails.
pub fn execute<G: GitHub, V: Git>(
    ctx: &AppContext<G, V>,
    workflow_file: &str,
    options: &TriggerOptions,
) -> TriggerOutcome {
    if ctx.github().check_installed().is_err() {
        return TriggerOutcome::failed(
            "GitHub CLI (gh) not found. Install it from https://cli.github.com/",
        );
    }
    if ctx.github().check_authenticated().is_err() {
        return TriggerOutcome::failed("GitHub CLI is not authenticated. Run: gh auth login");
    }

    let workflow_path = ctx.config().project_root.join(workflow_file);
    if !workflow_path.exists() {
        return TriggerOutcome::failed(format!("Workflow file not found: {workflow_file}"));
    }

    if ctx.github().repo_slug().is_err() {
        return TriggerOutcome::failed(
            "Could not resolve the GitHub repository. Run from a git repository with a \
             configured GitHub remote.",
        );
    }

    // The dispatch call takes the workflow's file name, not its path.
    let workflow_id = workflow_basename(workflow_file);

    let ref_name = match &options.ref_name {
        Some(name) => name.clone(),
        None => resolve_ref(ctx),
    };

    if let Err(err) = ctx.github().dispatch_workflow(&workflow_id, &ref_name, &options.inputs) {
        return TriggerOutcome::failed(format!("Failed to trigger workflow: {err}"));
    }

    // Run creation is asynchronous relative to list consistency; give the
    // listing a head start before the first resolution attempt.
    thread::sleep(ctx.config().trigger_delay);

    for attempt in 0..ctx.config().resolve_attempts {
        if let Ok(Some(run_id)) = ctx.github().latest_run_id(&workflow_id) {
            if let Err(err) = ctx.run_pointer().save(run_id) {
                return TriggerOutcome::failed(format!(
                    "Run {run_id} started but its id could not be saved: {err}"
                ));
            }
            return TriggerOutcome::triggered(run_id);
        }
        if attempt + 1 < ctx.config().resolve_attempts {
            thread::sleep(ctx.config().resolve_delay);
        }
    }

    TriggerOutcome::failed(
        "Workflow was triggered but no run id appeared in the listing. \
         Check the Actions page for the new run.",
    )
}

fn resolve_ref<G: GitHub, V: Git>(ctx: &AppContext<G, V>) -> String {
    match ctx.git().current_branch() {
        Ok(branch) if !branch.is_empty() => branch,
        _ => ctx.config().default_branch.clone(),
    }
}

fn workflow_basename(workflow_file: &str) -> String {
    Path::new(workflow_file)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| workflow_file.to_string())
}
