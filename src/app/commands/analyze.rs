//! Log analysis: extract errors and remediation hints from a collected
//! failure report.

use std::fs;
use std::path::Path;

use crate::app::console::Console;
use crate::domain::{AppError, LogAnalysis, analysis};

/// Analyze a collected failure report file.
pub fn execute(log_file: &Path) -> Result<LogAnalysis, AppError> {
    let contents = fs::read_to_string(log_file)?;
    Ok(analysis::analyze(&contents))
}

/// Print an analysis in the operator-facing layout.
pub fn print(console: &Console, analysis: &LogAnalysis) {
    if analysis.is_empty() {
        console.info("No errors or warnings recognized in the log.");
        return;
    }

    if !analysis.errors.is_empty() {
        console.info(&format!("Errors ({}):", analysis.errors.len()));
        for error in &analysis.errors {
            console.info(&format!("  - {error}"));
        }
    }
    if !analysis.warnings.is_empty() {
        console.info(&format!("Warnings ({}):", analysis.warnings.len()));
        for warning in &analysis.warnings {
            console.info(&format!("  - {warning}"));
        }
    }
    if !analysis.suggestions.is_empty() {
        console.info("Suggestions:");
        for suggestion in &analysis.suggestions {
            console.info(&format!("  - {suggestion}"));
        }
    }
}
