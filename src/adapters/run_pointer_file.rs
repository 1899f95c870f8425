use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::AppError;

/// File-backed pointer to the most recently triggered run.
///
/// One pointer at a time: a new trigger overwrites the previous id, and the
/// whole-file overwrite is the only consistency guarantee (last write wins,
/// no locking).
#[derive(Debug, Clone)]
pub struct RunPointerStore {
    path: PathBuf,
}

impl RunPointerStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the pointer with `run_id`.
    pub fn save(&self, run_id: u64) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, run_id.to_string())?;
        Ok(())
    }

    /// Read the pointer back. A missing file and unparsable contents are
    /// distinct failures.
    pub fn load(&self) -> Result<u64, AppError> {
        if !self.path.exists() {
            return Err(AppError::RunPointerMissing);
        }
        let contents = fs::read_to_string(&self.path)?;
        let trimmed = contents.trim();
        trimmed.parse().map_err(|_| AppError::InvalidRunPointer(trimmed.to_string()))
    }
}
