pub mod analysis;
pub mod cancel;
pub mod error;
pub mod outcome;
pub mod report;
pub mod run;

pub use analysis::LogAnalysis;
pub use cancel::CancelToken;
pub use error::AppError;
pub use outcome::{MonitorOutcome, TriggerOutcome};
pub use report::FailureReport;
pub use run::{JobRecord, RunConclusion, RunDetails, RunSnapshot, RunStatus};
