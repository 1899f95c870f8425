use std::sync::Mutex;

use crate::domain::AppError;
use crate::ports::Git;

/// Git port double; `None` simulates a failing branch lookup.
pub(crate) struct FakeGit {
    pub branch: Mutex<Option<String>>,
}

impl FakeGit {
    pub fn new(branch: &str) -> Self {
        Self { branch: Mutex::new(Some(branch.to_string())) }
    }

    pub fn failing() -> Self {
        Self { branch: Mutex::new(None) }
    }
}

impl Git for FakeGit {
    fn current_branch(&self) -> Result<String, AppError> {
        self.branch.lock().unwrap().clone().ok_or_else(|| AppError::GitError {
            command: "git branch --show-current".to_string(),
            details: "scripted failure".to_string(),
        })
    }
}
