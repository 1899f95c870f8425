use crate::domain::AppError;

/// Boundary to the version-control CLI.
pub trait Git {
    /// Name of the currently checked-out branch; empty on a detached HEAD.
    fn current_branch(&self) -> Result<String, AppError>;
}
