//! CLI Adapter.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::adapters::git_command::GitCommandAdapter;
use crate::adapters::github_command::GitHubCommandAdapter;
use crate::app::commands::{analyze, collect, monitor, run as run_workflow, trigger};
use crate::app::config::ManagerConfig;
use crate::app::context::AppContext;
use crate::domain::{AppError, CancelToken};

#[derive(Parser)]
#[command(name = "wfm")]
#[command(version)]
#[command(
    about = "Trigger, monitor, and debug GitHub Actions workflow runs",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Trigger a workflow and resolve the new run id
    #[clap(visible_alias = "t")]
    Trigger {
        /// Workflow file path relative to the project root
        workflow_file: String,
        /// Git ref to run on (default: current branch)
        #[arg(short, long)]
        r#ref: Option<String>,
        /// Workflow input as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Watch a run until it completes, collecting logs on failure
    #[clap(visible_alias = "w")]
    Watch {
        /// Run id (default: the last triggered run)
        run_id: Option<u64>,
        /// Poll interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Collect failure logs for a completed run
    #[clap(visible_alias = "l")]
    Logs {
        /// Run id
        run_id: u64,
    },
    /// Trigger a workflow and watch it to completion
    #[clap(visible_alias = "r")]
    Run {
        /// Workflow file path relative to the project root
        workflow_file: String,
        /// Git ref to run on (default: current branch)
        #[arg(short, long)]
        r#ref: Option<String>,
        /// Workflow input as key=value (repeatable)
        #[arg(short = 'f', long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,
        /// Poll interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },
    /// Analyze a collected failure report
    #[clap(visible_alias = "a")]
    Analyze {
        /// Path to a collected log file
        log_file: PathBuf,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    match dispatch(cli.command) {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(1);
        }
    }
}

fn dispatch(command: Commands) -> Result<i32, AppError> {
    let project_root = std::env::current_dir()?;
    let config = ManagerConfig::from_env(project_root.clone())?;
    let ctx = AppContext::new(
        GitHubCommandAdapter::new(),
        GitCommandAdapter::new(project_root),
        config,
    );

    match command {
        Commands::Trigger { workflow_file, r#ref, fields } => {
            let options =
                trigger::TriggerOptions { ref_name: r#ref, inputs: parse_fields(&fields)? };
            let outcome = trigger::execute(&ctx, &workflow_file, &options);
            if outcome.success {
                ctx.console().info(&outcome.message);
                Ok(0)
            } else {
                ctx.console().error(&outcome.message);
                Ok(1)
            }
        }
        Commands::Watch { run_id, interval } => {
            let options = monitor::MonitorOptions {
                poll_interval: interval
                    .map(Duration::from_secs)
                    .unwrap_or(ctx.config().poll_interval),
                cancel: CancelToken::new(),
            };
            Ok(monitor::execute(&ctx, run_id, &options).exit_code)
        }
        Commands::Logs { run_id } => match collect::execute(&ctx, run_id) {
            Some(path) => {
                ctx.console().info(&format!("Failure report saved to {}", path.display()));
                Ok(0)
            }
            None => {
                ctx.console().error("No logs could be collected");
                Ok(1)
            }
        },
        Commands::Run { workflow_file, r#ref, fields, interval } => {
            let options = run_workflow::RunOptions {
                ref_name: r#ref,
                inputs: parse_fields(&fields)?,
                poll_interval: interval.map(Duration::from_secs),
                cancel: CancelToken::new(),
            };
            Ok(run_workflow::execute(&ctx, &workflow_file, options).exit_code)
        }
        Commands::Analyze { log_file } => {
            let analysis = analyze::execute(&log_file)?;
            analyze::print(ctx.console(), &analysis);
            Ok(0)
        }
    }
}

fn parse_fields(fields: &[String]) -> Result<Vec<(String, String)>, AppError> {
    fields
        .iter()
        .map(|field| {
            field
                .split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| {
                    AppError::Configuration(format!("Invalid input '{field}': expected key=value"))
                })
        })
        .collect()
}
