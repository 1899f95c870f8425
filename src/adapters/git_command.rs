use std::path::PathBuf;
use std::process::Command;

use crate::domain::AppError;
use crate::ports::Git;

/// `git`-backed implementation of the Git port.
#[derive(Debug, Clone)]
pub struct GitCommandAdapter {
    root: PathBuf,
}

impl GitCommandAdapter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn run(&self, args: &[&str]) -> Result<String, AppError> {
        let output =
            Command::new("git").args(args).current_dir(&self.root).output().map_err(|e| {
                AppError::GitError {
                    command: format!("git {}", args.join(" ")),
                    details: e.to_string(),
                }
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(AppError::GitError {
                command: format!("git {}", args.join(" ")),
                details: if stderr.is_empty() { "unknown error".to_string() } else { stderr },
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl Git for GitCommandAdapter {
    fn current_branch(&self) -> Result<String, AppError> {
        self.run(&["branch", "--show-current"])
    }
}
